// Drawing seam between the simulation and whatever it paints on.
// The browser build paints on a 2d canvas context, tests record the calls.

use crate::color::Color;

pub trait Surface {
    type Error;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), Self::Error>;

    /// Fills the whole area with a top-to-bottom gradient. Stop offsets are in [0, 1].
    fn fill_vertical_gradient(
        &mut self,
        width: f64,
        height: f64,
        stops: &[(f64, Color)],
    ) -> Result<(), Self::Error>;

    fn fill_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), Self::Error>;

    fn fill_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), Self::Error>;

    fn stroke_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
        alpha: f64,
        line_width: f64,
    ) -> Result<(), Self::Error>;

    fn stroke_line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        color: Color,
        alpha: f64,
        line_width: f64,
    ) -> Result<(), Self::Error>;
}

#[cfg(test)]
pub mod recording {
    use super::*;
    use std::convert::Infallible;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Call {
        Clear,
        Gradient(Vec<(f64, Color)>),
        Rect { color: Color, alpha: f64 },
        Circle { x: f64, y: f64, radius: f64, color: Color, alpha: f64 },
        Ring { x: f64, y: f64, radius: f64, alpha: f64 },
        Line { from: [f64; 2], to: [f64; 2], alpha: f64 },
    }

    #[derive(Default)]
    pub struct RecordingSurface {
        pub calls: Vec<Call>,
    }

    impl RecordingSurface {
        pub fn circles(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::Circle { .. }))
                .count()
        }

        pub fn lines(&self) -> Vec<&Call> {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::Line { .. }))
                .collect()
        }

        pub fn rings(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::Ring { .. }))
                .count()
        }
    }

    impl Surface for RecordingSurface {
        type Error = Infallible;

        fn clear(&mut self, _width: f64, _height: f64) -> Result<(), Infallible> {
            self.calls.push(Call::Clear);
            Ok(())
        }

        fn fill_vertical_gradient(
            &mut self,
            _width: f64,
            _height: f64,
            stops: &[(f64, Color)],
        ) -> Result<(), Infallible> {
            self.calls.push(Call::Gradient(stops.to_vec()));
            Ok(())
        }

        fn fill_rect(
            &mut self,
            _x: f64,
            _y: f64,
            _width: f64,
            _height: f64,
            color: Color,
            alpha: f64,
        ) -> Result<(), Infallible> {
            self.calls.push(Call::Rect { color, alpha });
            Ok(())
        }

        fn fill_circle(
            &mut self,
            x: f64,
            y: f64,
            radius: f64,
            color: Color,
            alpha: f64,
        ) -> Result<(), Infallible> {
            self.calls.push(Call::Circle { x, y, radius, color, alpha });
            Ok(())
        }

        fn stroke_circle(
            &mut self,
            x: f64,
            y: f64,
            radius: f64,
            _color: Color,
            alpha: f64,
            _line_width: f64,
        ) -> Result<(), Infallible> {
            self.calls.push(Call::Ring { x, y, radius, alpha });
            Ok(())
        }

        fn stroke_line(
            &mut self,
            from: [f64; 2],
            to: [f64; 2],
            _color: Color,
            alpha: f64,
            _line_width: f64,
        ) -> Result<(), Infallible> {
            self.calls.push(Call::Line { from, to, alpha });
            Ok(())
        }
    }
}
