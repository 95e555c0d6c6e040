use crate::types::Rect;

/// Unused space on a sheet. `x` runs along the sheet length, `y` along its width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeRect {
    pub x: f64,
    pub y: f64,
    pub rect: Rect,
}

impl FreeRect {
    fn is_degenerate(&self) -> bool {
        self.rect.length <= 0.0 || self.rect.width <= 0.0
    }
}

/// Position handed back by [`GuillotineBin::place`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Placed size, already swapped when rotated.
    pub rect: Rect,
    pub x: f64,
    pub y: f64,
    pub rotated: bool,
}

/// Free-space bookkeeping for one sheet.
#[derive(Debug, Clone)]
pub struct GuillotineBin {
    kerf: f64,
    free_rects: Vec<FreeRect>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPlacement {
    pub free_idx: usize,
    pub rotated: bool,
    pub score: f64,
}

impl GuillotineBin {
    pub fn new(sheet: Rect, kerf: f64) -> Self {
        Self {
            kerf,
            free_rects: vec![FreeRect {
                x: 0.0,
                y: 0.0,
                rect: sheet,
            }],
        }
    }

    pub fn free_rects(&self) -> &[FreeRect] {
        &self.free_rects
    }

    pub fn free_area(&self) -> f64 {
        self.free_rects.iter().map(|f| f.rect.area()).sum()
    }

    /// Best Short Side Fit over every free rectangle. Only a strictly better
    /// score replaces the current best, so ties keep the earlier rectangle and
    /// the upright orientation.
    pub fn find_best(&self, piece: Rect, allow_rotate: bool) -> Option<ScoredPlacement> {
        let mut best: Option<ScoredPlacement> = None;

        for (idx, free) in self.free_rects.iter().enumerate() {
            let mut consider = |placed: Rect, rotated: bool| {
                if !placed.fits_in(&free.rect) {
                    return;
                }
                let score = Self::score(placed, free.rect);
                if best.is_none_or(|b| score < b.score) {
                    best = Some(ScoredPlacement {
                        free_idx: idx,
                        rotated,
                        score,
                    });
                }
            };

            consider(piece, false);
            if allow_rotate {
                consider(piece.rotated(), true);
            }
        }

        best
    }

    fn score(placed: Rect, free: Rect) -> f64 {
        f64::min(free.length - placed.length, free.width - placed.width)
    }

    pub fn place(&mut self, scored: ScoredPlacement, piece: Rect) -> Placement {
        let free = self.free_rects.remove(scored.free_idx);
        let placed = if scored.rotated {
            piece.rotated()
        } else {
            piece
        };

        self.split(free, placed);

        Placement {
            rect: placed,
            x: free.x,
            y: free.y,
            rotated: scored.rotated,
        }
    }

    /// Shorter Axis Split. Kerf is charged on both sides of the placed piece
    /// before measuring what is left.
    fn split(&mut self, free: FreeRect, placed: Rect) {
        let used_length = placed.length + self.kerf;
        let used_width = placed.width + self.kerf;
        let left_length = free.rect.length - used_length;
        let left_width = free.rect.width - used_width;

        let (first, second) = if left_length < left_width {
            // Full-length strip past the piece, short piece beside it
            (
                FreeRect {
                    x: free.x,
                    y: free.y + used_width,
                    rect: Rect::new(free.rect.length, left_width),
                },
                FreeRect {
                    x: free.x + used_length,
                    y: free.y,
                    rect: Rect::new(left_length, placed.width),
                },
            )
        } else {
            // Full-width strip beside the piece, short piece past it
            (
                FreeRect {
                    x: free.x + used_length,
                    y: free.y,
                    rect: Rect::new(left_length, free.rect.width),
                },
                FreeRect {
                    x: free.x,
                    y: free.y + used_width,
                    rect: Rect::new(placed.length, left_width),
                },
            )
        };

        for rect in [first, second] {
            if !rect.is_degenerate() {
                self.free_rects.push(rect);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_single_piece() {
        let mut bin = GuillotineBin::new(Rect::new(100.0, 100.0), 0.0);
        let piece = Rect::new(50.0, 30.0);
        let scored = bin.find_best(piece, false).unwrap();
        let p = bin.place(scored, piece);
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 0.0);
        assert_eq!(p.rect, piece);
        assert!(!p.rotated);
        assert_eq!(bin.free_rects().len(), 2);
        assert_eq!(bin.free_area(), 100.0 * 100.0 - 50.0 * 30.0);
    }

    #[test]
    fn test_piece_too_large() {
        let bin = GuillotineBin::new(Rect::new(100.0, 100.0), 0.0);
        assert!(bin.find_best(Rect::new(200.0, 50.0), true).is_none());
    }

    #[test]
    fn test_rotation_fit() {
        let bin = GuillotineBin::new(Rect::new(100.0, 50.0), 0.0);
        let piece = Rect::new(50.0, 100.0);
        // Doesn't fit without rotation
        assert!(bin.find_best(piece, false).is_none());
        // Fits with rotation
        let scored = bin.find_best(piece, true).unwrap();
        assert!(scored.rotated);
        assert_eq!(scored.score, 0.0);
    }

    #[test]
    fn test_tie_prefers_upright() {
        let bin = GuillotineBin::new(Rect::new(48.0, 24.0), 0.125);
        let scored = bin.find_best(Rect::new(24.0, 24.0), true).unwrap();
        assert!(!scored.rotated);
    }

    #[test]
    fn test_short_side_fit_picks_tightest_rect() {
        let mut bin = GuillotineBin::new(Rect::new(100.0, 100.0), 0.0);
        let first = Rect::new(30.0, 20.0);
        let scored = bin.find_best(first, false).unwrap();
        bin.place(scored, first);
        // Free: (0,20) 100x80 scores 40, (30,0) 70x20 scores 2
        assert_eq!(bin.free_rects().len(), 2);
        let piece = Rect::new(60.0, 18.0);
        let scored = bin.find_best(piece, false).unwrap();
        assert_eq!(scored.free_idx, 1);
        assert_eq!(scored.score, 2.0);
        let p = bin.place(scored, piece);
        assert_eq!((p.x, p.y), (30.0, 0.0));
    }

    #[test]
    fn test_tie_across_rects_keeps_earliest() {
        let mut bin = GuillotineBin::new(Rect::new(100.0, 100.0), 0.0);
        let first = Rect::new(50.0, 50.0);
        let scored = bin.find_best(first, false).unwrap();
        bin.place(scored, first);
        // Free: (50,0) 50x100 and (0,50) 50x50, both score 10
        let piece = Rect::new(40.0, 40.0);
        let scored = bin.find_best(piece, true).unwrap();
        assert_eq!(scored.free_idx, 0);
        assert_eq!(scored.score, 10.0);
        assert!(!scored.rotated);
        let p = bin.place(scored, piece);
        assert_eq!((p.x, p.y), (50.0, 0.0));
    }

    #[test]
    fn test_kerf() {
        let mut bin = GuillotineBin::new(Rect::new(100.0, 100.0), 5.0);
        let piece = Rect::new(50.0, 100.0);
        let scored = bin.find_best(piece, false).unwrap();
        bin.place(scored, piece);
        // Remaining length should be 100 - 50 - 5 = 45
        assert_eq!(
            bin.free_rects(),
            &[FreeRect {
                x: 55.0,
                y: 0.0,
                rect: Rect::new(45.0, 100.0),
            }]
        );
    }

    #[test]
    fn test_split_along_shorter_leftover() {
        // left_length = 70 < left_width = 80: full-length strip goes first
        let mut bin = GuillotineBin::new(Rect::new(100.0, 100.0), 0.0);
        let piece = Rect::new(30.0, 20.0);
        let scored = bin.find_best(piece, false).unwrap();
        bin.place(scored, piece);
        assert_eq!(
            bin.free_rects(),
            &[
                FreeRect {
                    x: 0.0,
                    y: 20.0,
                    rect: Rect::new(100.0, 80.0),
                },
                FreeRect {
                    x: 30.0,
                    y: 0.0,
                    rect: Rect::new(70.0, 20.0),
                },
            ]
        );

        // left_length = 80 >= left_width = 70: full-width strip goes first
        let mut bin = GuillotineBin::new(Rect::new(100.0, 100.0), 0.0);
        let piece = Rect::new(20.0, 30.0);
        let scored = bin.find_best(piece, false).unwrap();
        bin.place(scored, piece);
        assert_eq!(
            bin.free_rects(),
            &[
                FreeRect {
                    x: 20.0,
                    y: 0.0,
                    rect: Rect::new(80.0, 100.0),
                },
                FreeRect {
                    x: 0.0,
                    y: 30.0,
                    rect: Rect::new(20.0, 70.0),
                },
            ]
        );
    }

    #[test]
    fn test_fill_exact() {
        let mut bin = GuillotineBin::new(Rect::new(100.0, 100.0), 0.0);
        let piece = Rect::new(100.0, 100.0);
        let scored = bin.find_best(piece, false).unwrap();
        bin.place(scored, piece);
        assert!(bin.free_rects().is_empty());
    }

    #[test]
    fn test_zero_width_piece_leaves_no_degenerate_rects() {
        let mut bin = GuillotineBin::new(Rect::new(96.0, 48.0), 0.0);
        let piece = Rect::new(40.0, 0.0);
        let scored = bin.find_best(piece, false).unwrap();
        bin.place(scored, piece);
        assert!(bin.free_rects().iter().all(|f| !f.is_degenerate()));
    }
}
