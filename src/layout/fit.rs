use crate::units::Pt;
use crate::LetterheadError;
use std::str::FromStr;

/// Scale an image of `width` x `height` to fit within `max_width` x `max_height`,
/// keeping its aspect ratio. Images are never scaled up.
pub fn fit_image(width: Pt, height: Pt, max_width: Pt, max_height: Pt) -> (Pt, Pt) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let ratio = (max_width / width).min(max_height / height);
    (width * ratio, height * ratio)
}

/// Which part of a box an image sticks to when it doesn't fill the box
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Gravity {
    #[default]
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl FromStr for Gravity {
    type Err = LetterheadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "center" => Ok(Gravity::Center),
            "topleft" => Ok(Gravity::TopLeft),
            "topright" => Ok(Gravity::TopRight),
            "bottomleft" => Ok(Gravity::BottomLeft),
            "bottomright" => Ok(Gravity::BottomRight),
            _ => Err(LetterheadError::InvalidArgument(format!(
                "unsupported gravity `{s}`"
            ))),
        }
    }
}

/// The offset `(dx, dy)` of an image's top-left corner from the top-left corner of its
/// box, measured rightwards and downwards. Offsets are never negative.
pub fn place_in_box(
    box_width: Pt,
    box_height: Pt,
    width: Pt,
    height: Pt,
    gravity: Gravity,
) -> (Pt, Pt) {
    // images larger than the box hang out past its right and bottom edges
    let spare_x = (box_width - width).max(Pt::ZERO);
    let spare_y = (box_height - height).max(Pt::ZERO);
    match gravity {
        Gravity::Center => (spare_x / 2.0, spare_y / 2.0),
        Gravity::TopLeft => (Pt::ZERO, Pt::ZERO),
        Gravity::TopRight => (spare_x, Pt::ZERO),
        Gravity::BottomLeft => (Pt::ZERO, spare_y),
        Gravity::BottomRight => (spare_x, spare_y),
    }
}

/// Whether an image has enough pixels to cover a box in at least one dimension
pub fn has_sufficient_resolution(width: Pt, height: Pt, box_width: Pt, box_height: Pt) -> bool {
    width >= box_width || height >= box_height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrinks_by_the_tighter_ratio() {
        assert_eq!(
            fit_image(Pt(400.0), Pt(200.0), Pt(200.0), Pt(200.0)),
            (Pt(200.0), Pt(100.0))
        );
        assert_eq!(
            fit_image(Pt(100.0), Pt(400.0), Pt(200.0), Pt(200.0)),
            (Pt(50.0), Pt(200.0))
        );
    }

    #[test]
    fn never_upscales() {
        assert_eq!(
            fit_image(Pt(50.0), Pt(20.0), Pt(200.0), Pt(200.0)),
            (Pt(50.0), Pt(20.0))
        );
    }

    #[test]
    fn places_by_gravity() {
        let place = |gravity| place_in_box(Pt(100.0), Pt(50.0), Pt(60.0), Pt(30.0), gravity);
        assert_eq!(place(Gravity::Center), (Pt(20.0), Pt(10.0)));
        assert_eq!(place(Gravity::TopLeft), (Pt(0.0), Pt(0.0)));
        assert_eq!(place(Gravity::TopRight), (Pt(40.0), Pt(0.0)));
        assert_eq!(place(Gravity::BottomLeft), (Pt(0.0), Pt(20.0)));
        assert_eq!(place(Gravity::BottomRight), (Pt(40.0), Pt(20.0)));

    }

    #[test]
    fn oversized_images_stay_pinned_to_the_top_left() {
        for gravity in [
            Gravity::Center,
            Gravity::TopLeft,
            Gravity::TopRight,
            Gravity::BottomLeft,
            Gravity::BottomRight,
        ] {
            assert_eq!(
                place_in_box(Pt(10.0), Pt(10.0), Pt(20.0), Pt(30.0), gravity),
                (Pt::ZERO, Pt::ZERO),
                "{gravity:?}"
            );
        }

        // only the overflowing axis is clamped
        assert_eq!(
            place_in_box(Pt(100.0), Pt(10.0), Pt(60.0), Pt(30.0), Gravity::BottomRight),
            (Pt(40.0), Pt::ZERO)
        );
        assert_eq!(
            place_in_box(Pt(10.0), Pt(50.0), Pt(20.0), Pt(30.0), Gravity::BottomLeft),
            (Pt::ZERO, Pt(20.0))
        );
    }

    #[test]
    fn parses_gravity() {
        assert_eq!("bottomright".parse::<Gravity>().unwrap(), Gravity::BottomRight);
        assert!(matches!(
            "north".parse::<Gravity>(),
            Err(LetterheadError::InvalidArgument(_))
        ));
    }

    #[test]
    fn resolution_needs_one_covering_dimension() {
        assert!(has_sufficient_resolution(Pt(300.0), Pt(10.0), Pt(200.0), Pt(200.0)));
        assert!(has_sufficient_resolution(Pt(10.0), Pt(200.0), Pt(200.0), Pt(200.0)));
        assert!(!has_sufficient_resolution(Pt(199.0), Pt(199.0), Pt(200.0), Pt(200.0)));
    }
}
