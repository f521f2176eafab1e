mod ffmpeg_command;
mod ffmpeg_probe;
mod path_validator;

pub use ffmpeg_command::{ProcessOutput, run_with_timeout};
pub use ffmpeg_probe::{VideoInfo, parse_video_info, probe_video_info};
pub use path_validator::{
    ensure_directory_exists, validate_directory_writable, validate_input_readable,
};
