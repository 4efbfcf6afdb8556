//! Pointer and scroll math for the decorative effects. No element access.

use crate::core::element::Rect;

/// Hero parallax state for a scroll offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallax {
    pub translate_y: f64,
    pub opacity: f64,
}

impl Parallax {
    /// `None` once the hero has scrolled fully out of view
    pub fn at(scrolled: f64, hero_height: f64, rate: f64) -> Option<Self> {
        if scrolled >= hero_height || hero_height <= 0.0 {
            return None;
        }
        Some(Self { translate_y: scrolled * rate, opacity: 1.0 - scrolled / hero_height })
    }

    pub fn transform(&self) -> String {
        format!("translateY({}px)", self.translate_y)
    }
}

/// 3-D card tilt from the cursor's offset to the card center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl Tilt {
    /// `client_x` / `client_y` are viewport coordinates
    pub fn at(rect: Rect, client_x: f64, client_y: f64, divisor: f64) -> Self {
        let x = client_x - rect.left;
        let y = client_y - rect.top;
        let (center_x, center_y) = rect.center();
        Self {
            rotate_x: (y - center_y) / divisor,
            rotate_y: (center_x - x) / divisor,
        }
    }

    pub fn transform(&self) -> String {
        format!(
            "perspective(1000px) rotateX({}deg) rotateY({}deg) translateY(-10px)",
            self.rotate_x, self.rotate_y
        )
    }
}

/// Orb displacement for a normalized cursor position (0..1 on each axis)
pub fn orb_offset(index: usize, x: f64, y: f64, speed: f64) -> (f64, f64) {
    let speed = (index as f64 + 1.0) * speed;
    ((x - 0.5) * speed, (y - 0.5) * speed)
}

pub fn translate(dx: f64, dy: f64) -> String {
    format!("translate({}px, {}px)", dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallax_only_inside_hero() {
        let p = Parallax::at(200.0, 800.0, 0.3).unwrap();
        assert!((p.translate_y - 60.0).abs() < 1e-9);
        assert_eq!(p.opacity, 0.75);
        assert!(Parallax::at(800.0, 800.0, 0.3).is_none());
        assert!(Parallax::at(10.0, 0.0, 0.3).is_none());
    }

    #[test]
    fn tilt_is_zero_at_center() {
        let rect = Rect::new(100.0, 50.0, 400.0, 200.0);
        let centered = Tilt::at(rect, 300.0, 150.0, 20.0);
        assert_eq!(centered, Tilt { rotate_x: 0.0, rotate_y: 0.0 });

        let corner = Tilt::at(rect, 100.0, 50.0, 20.0);
        assert_eq!(corner.rotate_x, -5.0);
        assert_eq!(corner.rotate_y, 10.0);
        assert!(corner.transform().starts_with("perspective(1000px) rotateX(-5deg) rotateY(10deg)"));
    }

    #[test]
    fn orbs_scale_with_index() {
        assert_eq!(orb_offset(0, 0.5, 0.5, 20.0), (0.0, 0.0));
        assert_eq!(orb_offset(0, 1.0, 0.0, 20.0), (10.0, -10.0));
        assert_eq!(orb_offset(2, 1.0, 0.0, 20.0), (30.0, -30.0));
    }
}
