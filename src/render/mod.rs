mod animation;
mod boundary;
mod scatter;
mod sink;

pub use animation::Animation;
pub use boundary::boundary_line;
pub use scatter::ClassPoints;
pub use sink::{check_output_dir, sink_for, FfmpegSink, FrameSink, GifSink, MemorySink};
