use std::ops::Range;

use log::info;
use plotters::{coord::Shift, prelude::*};

use super::{boundary_line, ClassPoints, FrameSink};
use crate::{config::RenderConfig, training::Trajectory, HyperplaneErr, Result};

/// Share of the data extent left empty around the scatter.
const PADDING: f32 = 0.1;

/// Draws the scatter of both classes with the line of one training iteration on top, one frame
/// per captured iteration.
pub struct Animation {
    points: ClassPoints,
    trajectory: Trajectory,
    cfg: RenderConfig,
    x_axis: Range<f32>,
    y_axis: Range<f32>,
}

impl Animation {
    /// Creates a new `Animation`.
    ///
    /// The axes fit the scatter, the line is clipped to them.
    ///
    /// # Arguments
    /// * `points` - The background scatter.
    /// * `trajectory` - The captured weights and biases, one frame each.
    /// * `cfg` - The frame size, line sampling and captions.
    ///
    /// # Returns
    /// A new `Animation` instance.
    pub fn new(points: ClassPoints, trajectory: Trajectory, cfg: RenderConfig) -> Self {
        let ((x0, x1), (y0, y1)) = points
            .bounds()
            .unwrap_or((cfg.x_range, cfg.x_range));

        Self {
            x_axis: padded(x0, x1),
            y_axis: padded(y0, y1),
            points,
            trajectory,
            cfg,
        }
    }

    /// Returns the amount of frames.
    pub fn len(&self) -> usize {
        self.trajectory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectory.is_empty()
    }

    /// Returns the size in bytes of one RGB frame.
    pub fn frame_len(&self) -> usize {
        self.cfg.width as usize * self.cfg.height as usize * 3
    }

    /// Draws every frame into `sink`.
    ///
    /// # Returns
    /// The amount of frames written, or `NoFrames` if nothing was captured, in which case the
    /// sink is never opened.
    pub fn run(&self, sink: &mut dyn FrameSink) -> Result<usize> {
        if self.is_empty() {
            return Err(HyperplaneErr::NoFrames);
        }

        let n = self.len();
        let mut buf = vec![0; self.frame_len()];

        sink.begin(self.cfg.width, self.cfg.height)?;

        for i in 0..n {
            info!("Processing observation: {i}/{n}");
            self.render_frame(i, &mut buf)?;
            sink.push(&buf)?;
        }

        sink.finish()?;
        Ok(n)
    }

    /// Draws frame `idx` into `buf`.
    ///
    /// # Arguments
    /// * `idx` - The training iteration to draw.
    /// * `buf` - An RGB buffer of `frame_len` bytes.
    pub fn render_frame(&self, idx: usize, buf: &mut [u8]) -> Result<()> {
        let Some((w, bias)) = self.trajectory.get(idx) else {
            return Err(HyperplaneErr::SizeMismatch {
                a: "frame index",
                b: "captured iterations",
                got: idx,
                expected: self.len(),
            });
        };

        if buf.len() != self.frame_len() {
            return Err(HyperplaneErr::SizeMismatch {
                a: "frame buffer",
                b: "frame size",
                got: buf.len(),
                expected: self.frame_len(),
            });
        }

        let line = boundary_line(w, bias, self.cfg.x_range, self.cfg.samples);
        let root = BitMapBackend::with_buffer(buf, (self.cfg.width, self.cfg.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(HyperplaneErr::plot)?;

        if self.cfg.captions {
            let titled = root
                .titled("Binary Data Sample", ("sans-serif", 20))
                .map_err(HyperplaneErr::plot)?;
            self.draw(&titled, idx, &line)?;
        } else {
            self.draw(&root, idx, &line)?;
        }

        root.present().map_err(HyperplaneErr::plot)
    }

    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        idx: usize,
        line: &[(f32, f32)],
    ) -> Result<()> {
        let captions = self.cfg.captions;
        let mut builder = ChartBuilder::on(area);
        builder.margin(10);

        if captions {
            builder
                .caption(format!("Iteration {idx}"), ("sans-serif", 16))
                .x_label_area_size(30)
                .y_label_area_size(40);
        }

        let mut chart = builder
            .build_cartesian_2d(self.x_axis.clone(), self.y_axis.clone())
            .map_err(HyperplaneErr::plot)?;

        if captions {
            chart
                .configure_mesh()
                .x_desc("x")
                .y_desc("y")
                .draw()
                .map_err(HyperplaneErr::plot)?;
        }

        chart
            .draw_series(
                self.points
                    .blue
                    .iter()
                    .map(|&p| Circle::new(p, 3, BLUE.filled())),
            )
            .map_err(HyperplaneErr::plot)?
            .label("Label = 1")
            .legend(|(x, y)| Circle::new((x, y), 3, BLUE.filled()));

        chart
            .draw_series(
                self.points
                    .red
                    .iter()
                    .map(|&p| Circle::new(p, 3, RED.filled())),
            )
            .map_err(HyperplaneErr::plot)?
            .label("Label = -1")
            .legend(|(x, y)| Circle::new((x, y), 3, RED.filled()));

        chart
            .draw_series(LineSeries::new(line.iter().copied(), &GREEN))
            .map_err(HyperplaneErr::plot)?
            .label("hyperplane")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));

        if captions {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(HyperplaneErr::plot)?;
        }

        Ok(())
    }
}

fn padded(lo: f32, hi: f32) -> Range<f32> {
    let pad = match (hi - lo) * PADDING {
        pad if pad > 0. => pad,
        _ => 1.,
    };

    (lo - pad)..(hi + pad)
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::{
        arch::ParamValue,
        render::MemorySink,
        training::Observation,
    };

    fn small_cfg() -> RenderConfig {
        RenderConfig {
            width: 64,
            height: 48,
            samples: 50,
            captions: false,
            ..RenderConfig::default()
        }
    }

    fn points() -> ClassPoints {
        ClassPoints {
            blue: vec![(-2., 1.), (-1., 2.)],
            red: vec![(1., -2.), (2., -1.)],
        }
    }

    fn trajectory(n: usize) -> Trajectory {
        let obs: Vec<_> = (0..n)
            .flat_map(|i| {
                let w = ParamValue::Vector(array![i as f32 * 0.5, -1.]);
                let b = ParamValue::Scalar(i as f32 - 1.);
                [Observation::new(i, "w", w), Observation::new(i, "bias", b)]
            })
            .collect();

        Trajectory::from_observations(&obs).unwrap()
    }

    #[test]
    fn one_frame_per_captured_iteration() {
        let anim = Animation::new(points(), trajectory(3), small_cfg());
        let mut sink = MemorySink::new();

        assert_eq!(anim.run(&mut sink).unwrap(), 3);
        assert_eq!(sink.size, (64, 48));
        assert_eq!(sink.frames.len(), 3);
        assert!(sink.frames.iter().all(|f| f.len() == 64 * 48 * 3));
        assert!(sink.finished);
        assert_ne!(sink.frames[0], sink.frames[2]);
    }

    #[test]
    fn default_frames_draw_titles_axes_and_legend() {
        let cfg = RenderConfig::default();
        let bare = RenderConfig {
            captions: false,
            ..cfg.clone()
        };

        let anim = Animation::new(points(), trajectory(1), cfg);
        let mut sink = MemorySink::new();
        assert_eq!(anim.run(&mut sink).unwrap(), 1);
        assert_eq!(sink.size, (640, 480));

        let mut plain = vec![0; anim.frame_len()];
        Animation::new(points(), trajectory(1), bare)
            .render_frame(0, &mut plain)
            .unwrap();

        assert_ne!(sink.frames[0], plain);
        // The title row sits above the plotting area and is blank without captions.
        let title_row = &sink.frames[0][..640 * 20 * 3];
        assert!(title_row.iter().any(|&b| b != 255));
        assert!(plain[..640 * 20 * 3].iter().all(|&b| b == 255));
    }

    #[test]
    fn nothing_captured_nothing_encoded() {
        let anim = Animation::new(points(), trajectory(0), small_cfg());
        let mut sink = MemorySink::new();

        assert!(matches!(anim.run(&mut sink), Err(HyperplaneErr::NoFrames)));
        assert!(sink.frames.is_empty());
        assert!(!sink.finished);
    }

    #[test]
    fn frames_outside_the_trajectory_are_rejected() {
        let anim = Animation::new(points(), trajectory(1), small_cfg());
        let mut buf = vec![0; anim.frame_len()];

        assert!(anim.render_frame(0, &mut buf).is_ok());
        assert!(anim.render_frame(1, &mut buf).is_err());
        assert!(anim.render_frame(0, &mut buf[1..]).is_err());
    }

    #[test]
    fn axes_fit_the_scatter() {
        let anim = Animation::new(points(), trajectory(1), small_cfg());

        assert!(anim.x_axis.start < -2. && anim.x_axis.end > 2.);
        assert_eq!(padded(1., 1.), 0.0..2.0);
    }
}
