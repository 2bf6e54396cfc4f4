// Sky backdrop derived from scroll progress.
//
// The page scrolls from a daytime sky, through the deep navy behind the
// bubbles section, into a black night sky. Progress is split into contiguous
// segments that either hold a palette or blend from one palette to the next.
// The sun follows an arc across the viewport and fades out as night falls.

use std::f64::consts::PI;

use crate::color::Color;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Palette {
    pub top: Color,
    pub middle: Color,
    pub bottom: Color,
}

impl Palette {
    pub const DAY: Palette = Palette {
        top: Color::from_u32(0x1e5799ff),
        middle: Color::from_u32(0x4a90c2ff),
        bottom: Color::from_u32(0x7ec8e3ff),
    };
    pub const DEEP: Palette = Palette {
        top: Color::from_u32(0x0f172aff),
        middle: Color::from_u32(0x131c2eff),
        bottom: Color::from_u32(0x162032ff),
    };
    pub const NIGHT: Palette = Palette {
        top: Color::BLACK,
        middle: Color::BLACK,
        bottom: Color::BLACK,
    };

    pub fn lerp(&self, other: &Palette, t: f64) -> Palette {
        Palette {
            top: self.top.lerp(other.top, t),
            middle: self.middle.lerp(other.middle, t),
            bottom: self.bottom.lerp(other.bottom, t),
        }
    }
}

/// A stretch of scroll progress. `from == to` holds a palette constant.
#[derive(Copy, Clone, Debug)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub from: Palette,
    pub to: Palette,
}

impl Segment {
    pub fn palette_at(&self, progress: f64) -> Palette {
        if self.from == self.to {
            return self.from;
        }
        let t = (progress - self.start) / (self.end - self.start);
        self.from.lerp(&self.to, t.max(0.0).min(1.0))
    }
}

pub static SEGMENTS: [Segment; 5] = [
    Segment { start: 0.0, end: 0.10, from: Palette::DAY, to: Palette::DAY },
    Segment { start: 0.10, end: 0.18, from: Palette::DAY, to: Palette::DEEP },
    Segment { start: 0.18, end: 0.55, from: Palette::DEEP, to: Palette::DEEP },
    Segment { start: 0.55, end: 0.70, from: Palette::DEEP, to: Palette::NIGHT },
    Segment { start: 0.70, end: 1.0, from: Palette::NIGHT, to: Palette::NIGHT },
];

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SkyTheme {
    pub top: Color,
    pub middle: Color,
    pub bottom: Color,
    /// Percent of viewport width.
    pub sun_x: f64,
    /// Percent of viewport height, measured from the top.
    pub sun_y: f64,
    pub sun_color: Color,
    pub sun_opacity: f64,
    pub is_night: bool,
    pub star_opacity: f64,
}

impl SkyTheme {
    pub const SUN_GOLD: Color = Color::from_u32(0xffd700ff);
    pub const SUN_EMBER: Color = Color::from_u32(0x8b0000ff);
    pub const SUN_REDDEN_START: f64 = 0.3;
    pub const SUN_REDDEN_SPAN: f64 = 0.4;
    pub const SUN_FADE_START: f64 = 0.55;
    pub const SUN_FADE_SPAN: f64 = 0.15;
    pub const NIGHT_START: f64 = 0.70;
    pub const STAR_FADE_SPAN: f64 = 0.15;

    pub fn at(progress: f64) -> SkyTheme {
        let p = if progress.is_finite() {
            progress.max(0.0).min(1.0)
        } else {
            0.0
        };
        let palette = segment_for(p).palette_at(p);

        let sun_x = 10.0 + 80.0 * p;
        let sun_y = 80.0 - (p * PI).sin() * 60.0;
        let sun_color = if p < SkyTheme::SUN_REDDEN_START {
            SkyTheme::SUN_GOLD
        } else {
            let t = ((p - SkyTheme::SUN_REDDEN_START) / SkyTheme::SUN_REDDEN_SPAN).min(1.0);
            SkyTheme::SUN_GOLD.lerp(SkyTheme::SUN_EMBER, t)
        };
        let sun_opacity = if p > SkyTheme::SUN_FADE_START {
            (1.0 - (p - SkyTheme::SUN_FADE_START) / SkyTheme::SUN_FADE_SPAN).max(0.0)
        } else {
            1.0
        };
        let is_night = p > SkyTheme::NIGHT_START;
        let star_opacity = if is_night {
            ((p - SkyTheme::NIGHT_START) / SkyTheme::STAR_FADE_SPAN).min(1.0)
        } else {
            0.0
        };

        SkyTheme {
            top: palette.top,
            middle: palette.middle,
            bottom: palette.bottom,
            sun_x,
            sun_y,
            sun_color,
            sun_opacity,
            is_night,
            star_opacity,
        }
    }
}

fn segment_for(progress: f64) -> &'static Segment {
    SEGMENTS
        .iter()
        .find(|s| progress < s.end)
        .unwrap_or(&SEGMENTS[SEGMENTS.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_gap(a: Color, b: Color) -> i32 {
        [
            (a.r as i32 - b.r as i32).abs(),
            (a.g as i32 - b.g as i32).abs(),
            (a.b as i32 - b.b as i32).abs(),
        ]
        .iter()
        .copied()
        .max()
        .unwrap_or(0)
    }

    #[test]
    fn segments_are_contiguous_and_increasing() {
        assert_eq!(SEGMENTS[0].start, 0.0);
        assert_eq!(SEGMENTS[SEGMENTS.len() - 1].end, 1.0);
        for pair in SEGMENTS.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
            assert!(pair[0].start < pair[0].end);
            assert_eq!(pair[0].to, pair[1].from);
        }
    }

    #[test]
    fn colors_are_continuous_across_boundaries() {
        let eps = 1e-9;
        for seg in SEGMENTS.iter().skip(1) {
            let before = SkyTheme::at(seg.start - eps);
            let after = SkyTheme::at(seg.start + eps);
            assert!(channel_gap(before.top, after.top) <= 1);
            assert!(channel_gap(before.middle, after.middle) <= 1);
            assert!(channel_gap(before.bottom, after.bottom) <= 1);
            assert!(channel_gap(before.sun_color, after.sun_color) <= 1);
            assert!((before.sun_opacity - after.sun_opacity).abs() < 1e-6);
        }
    }

    #[test]
    fn day_and_night_endpoints() {
        let day = SkyTheme::at(0.0);
        assert_eq!(day.top, Palette::DAY.top);
        assert_eq!(day.sun_color, SkyTheme::SUN_GOLD);
        assert_eq!(day.sun_opacity, 1.0);
        assert_eq!(day.star_opacity, 0.0);
        assert!((day.sun_x - 10.0).abs() < 1e-12);
        assert!((day.sun_y - 80.0).abs() < 1e-12);

        let night = SkyTheme::at(1.0);
        assert_eq!(night.bottom, Color::BLACK);
        assert_eq!(night.sun_color, SkyTheme::SUN_EMBER);
        assert_eq!(night.sun_opacity, 0.0);
        assert!(night.is_night);
        assert_eq!(night.star_opacity, 1.0);
    }

    #[test]
    fn sun_peaks_mid_scroll() {
        let noon = SkyTheme::at(0.5);
        assert!((noon.sun_x - 50.0).abs() < 1e-12);
        assert!((noon.sun_y - 20.0).abs() < 1e-9);
        assert!(SkyTheme::at(0.25).sun_y > noon.sun_y);
        assert!(SkyTheme::at(0.75).sun_y > noon.sun_y);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(SkyTheme::at(-3.0), SkyTheme::at(0.0));
        assert_eq!(SkyTheme::at(7.0), SkyTheme::at(1.0));
        assert_eq!(SkyTheme::at(f64::NAN), SkyTheme::at(0.0));
    }
}
