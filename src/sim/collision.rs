//! Player vs platform collision resolution
//!
//! Axis-separated: X is moved and resolved completely before Y moves.
//! Horizontal contact simply undoes the move. Vertical contact distinguishes
//! three cases by the sign of vy:
//! - falling: land if any part of the foot band is over the platform, unless
//!   the feet start on that surface with the center past its edge
//! - resting: stay grounded only while the body's center is over the platform
//! - rising: bump the head and stop just under the platform

use super::geometry::{Rect, overlaps};
use crate::consts::{FOOT_MARGIN, SUPPORT_TOLERANCE};

/// Outcome of the vertical pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerticalContact {
    /// Index of the platform the body now stands on
    pub support: Option<usize>,
    /// Index of the platform the body bumped from below
    pub ceiling: Option<usize>,
}

impl VerticalContact {
    #[inline]
    pub fn grounded(&self) -> bool {
        self.support.is_some()
    }
}

/// Horizontal span of the feet, inset from the body edges
#[inline]
pub fn foot_band(body: &Rect) -> (f32, f32) {
    (body.x + FOOT_MARGIN, body.right() - FOOT_MARGIN)
}

#[inline]
fn feet_over(body: &Rect, platform: &Rect) -> bool {
    let (left, right) = foot_band(body);
    left < platform.right() && right > platform.x
}

#[inline]
fn centered_on(body: &Rect, platform: &Rect) -> bool {
    let center = body.center_x();
    center >= platform.x && center <= platform.right()
}

#[inline]
fn x_overlap(a: &Rect, b: &Rect) -> f32 {
    a.right().min(b.right()) - a.x.max(b.x)
}

/// Move by `vx`, undoing the move and zeroing `vx` on contact.
///
/// A platform the body already overlaps (dropping past its edge) only blocks
/// moves that push deeper into it. Returns true if the move was blocked.
pub fn move_x(body: &mut Rect, vx: &mut f32, platforms: &[Rect]) -> bool {
    let before = *body;
    body.x += *vx;
    let blocked = platforms.iter().any(|p| {
        overlaps(body, p) && (!overlaps(&before, p) || x_overlap(body, p) > x_overlap(&before, p))
    });
    if blocked {
        *body = before;
        *vx = 0.0;
    }
    blocked
}

/// Move by `vy` and resolve against platforms.
pub fn move_y(body: &mut Rect, vy: &mut f32, platforms: &[Rect]) -> VerticalContact {
    let prev_bottom = body.bottom();
    body.y += *vy;
    let mut contact = VerticalContact::default();

    for (i, p) in platforms.iter().enumerate() {
        if *vy > 0.0 {
            // Feet already below the top never snap back up onto it
            if prev_bottom > p.y + SUPPORT_TOLERANCE {
                continue;
            }
            // Stepping off an edge: the surface the feet left does not catch them
            let on_surface = prev_bottom >= p.y - SUPPORT_TOLERANCE;
            if on_surface && !centered_on(body, p) {
                continue;
            }
            if overlaps(body, p) && feet_over(body, p) {
                body.y = p.y - body.h;
                *vy = 0.0;
                contact.support = Some(i);
            }
        } else if *vy < 0.0 {
            if overlaps(body, p) {
                body.y = p.bottom();
                *vy = 0.0;
                contact.ceiling = Some(i);
            }
        } else if contact.ceiling.is_none() {
            let foot_y = body.bottom();
            let on_top = foot_y >= p.y && foot_y <= p.y + SUPPORT_TOLERANCE;
            if on_top && centered_on(body, p) && feet_over(body, p) {
                body.y = p.y - body.h;
                contact.support = Some(i);
            }
        }
    }

    contact
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ground() -> Rect {
        Rect::new(0.0, 550.0, 500.0, 50.0)
    }

    #[test]
    fn test_wall_blocks_and_zeroes_velocity() {
        let wall = Rect::new(230.0, 400.0, 100.0, 150.0);
        let mut body = Rect::new(100.0, 430.0, 120.0, 120.0);
        let mut vx = 12.0;
        assert!(move_x(&mut body, &mut vx, &[ground(), wall]));
        assert_eq!(body.x, 100.0);
        assert_eq!(vx, 0.0);
    }

    #[test]
    fn test_standing_on_ground_does_not_block_x() {
        let mut body = Rect::new(100.0, 430.0, 120.0, 120.0);
        let mut vx = 6.0;
        assert!(!move_x(&mut body, &mut vx, &[ground()]));
        assert_eq!(body.x, 106.0);
    }

    #[test]
    fn test_falling_lands_on_top() {
        let mut body = Rect::new(100.0, 425.0, 120.0, 120.0);
        let mut vy = 8.0;
        let contact = move_y(&mut body, &mut vy, &[ground()]);
        assert_eq!(contact.support, Some(0));
        assert_eq!(body.bottom(), 550.0);
        assert_eq!(vy, 0.0);
    }

    #[test]
    fn test_falling_misses_when_only_margin_overlaps() {
        // Body overhangs the platform's left edge by less than the foot margin
        let platform = Rect::new(215.0, 550.0, 200.0, 50.0);
        let mut body = Rect::new(100.0, 425.0, 120.0, 120.0);
        let mut vy = 8.0;
        let contact = move_y(&mut body, &mut vy, &[platform]);
        assert!(!contact.grounded());
        assert_eq!(vy, 8.0);
    }

    #[test]
    fn test_resting_requires_center_over_platform() {
        // Center at 160 is past the platform's right edge at 150
        let ledge = Rect::new(0.0, 550.0, 150.0, 50.0);
        let mut body = Rect::new(100.0, 430.0, 120.0, 120.0);
        let mut vy = 0.0;
        let contact = move_y(&mut body, &mut vy, &[ledge]);
        assert!(!contact.grounded());

        let mut body = Rect::new(20.0, 430.0, 120.0, 120.0);
        let contact = move_y(&mut body, &mut vy, &[ledge]);
        assert!(contact.grounded());
        assert_eq!(body.bottom(), 550.0);
    }

    #[test]
    fn test_stepping_off_edge_is_not_caught_by_foot_band() {
        // Foot band 370..470 still reaches the ledge, center 420 does not
        let ledge = Rect::new(0.0, 550.0, 400.0, 50.0);
        let mut body = Rect::new(360.0, 430.0, 120.0, 120.0);
        let mut vy = 0.8;
        let contact = move_y(&mut body, &mut vy, &[ledge]);
        assert!(!contact.grounded());
        assert_eq!(vy, 0.8);
        assert!(body.bottom() > 550.0);
    }

    #[test]
    fn test_sunk_feet_do_not_snap_back_up() {
        let ledge = Rect::new(0.0, 550.0, 400.0, 50.0);
        let mut body = Rect::new(300.0, 440.0, 120.0, 120.0);
        let mut vy = 3.0;
        let contact = move_y(&mut body, &mut vy, &[ledge]);
        assert!(!contact.grounded());
        assert_eq!(body.bottom(), 563.0);
    }

    #[test]
    fn test_dropping_body_can_move_away_but_not_deeper() {
        let ledge = Rect::new(0.0, 550.0, 400.0, 50.0);
        let mut body = Rect::new(360.0, 440.0, 120.0, 120.0);
        let mut vx = 6.0;
        assert!(!move_x(&mut body, &mut vx, &[ledge]));
        assert_eq!(body.x, 366.0);

        let mut vx = -6.0;
        assert!(move_x(&mut body, &mut vx, &[ledge]));
        assert_eq!(body.x, 366.0);
        assert_eq!(vx, 0.0);
    }

    #[test]
    fn test_rising_bumps_head() {
        let bridge = Rect::new(100.0, 300.0, 100.0, 20.0);
        let mut body = Rect::new(100.0, 330.0, 120.0, 120.0);
        let mut vy = -15.0;
        let contact = move_y(&mut body, &mut vy, &[bridge]);
        assert_eq!(contact.ceiling, Some(0));
        assert_eq!(body.y, 320.0);
        assert_eq!(vy, 0.0);
        assert!(!overlaps(&body, &bridge));
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (0.0f32..800.0, 0.0f32..600.0, 10.0f32..300.0, 10.0f32..120.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn horizontal_resolution_never_leaves_overlap(
            platforms in proptest::collection::vec(arb_rect(), 0..8),
            start in (0.0f32..800.0, 0.0f32..600.0),
            vx in -25.0f32..25.0,
        ) {
            let mut body = Rect::new(start.0, start.1, 120.0, 120.0);
            prop_assume!(!platforms.iter().any(|p| overlaps(&body, p)));

            let mut vx = vx;
            move_x(&mut body, &mut vx, &platforms);
            for p in &platforms {
                prop_assert!(!overlaps(&body, p));
            }
        }

        #[test]
        fn vertical_push_out_clears_that_platform(
            platforms in proptest::collection::vec(arb_rect(), 0..8),
            start in (0.0f32..800.0, 0.0f32..600.0),
            vy in -25.0f32..25.0,
        ) {
            let mut body = Rect::new(start.0, start.1, 120.0, 120.0);
            prop_assume!(!platforms.iter().any(|p| overlaps(&body, p)));

            let mut vy = vy;
            let contact = move_y(&mut body, &mut vy, &platforms);
            if let Some(i) = contact.support {
                prop_assert!(!overlaps(&body, &platforms[i]));
                prop_assert_eq!(vy, 0.0);
            }
            if let Some(i) = contact.ceiling {
                prop_assert!(!overlaps(&body, &platforms[i]));
                prop_assert_eq!(vy, 0.0);
            }
        }
    }
}
