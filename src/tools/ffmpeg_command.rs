//! 外部程序執行工具
//!
//! 所有轉碼器呼叫都經過這裡，並受逾時限制。
//! 逾時到期後會直接 kill 子程序，避免在掛掉的轉碼器上無限等待。

use crate::error::ThumbnailError;
use log::debug;
use std::io;
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// try_wait 輪詢間隔
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// 子程序的完整輸出
#[derive(Debug)]
pub struct ProcessOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// stdout 與 stderr 合併後的文字（轉碼器的診斷輸出寫在 stderr）
    #[must_use]
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

/// 執行指令並等待結束，超過 `timeout` 即 kill 並回報逾時
///
/// stdout/stderr 由獨立執行緒讀取，避免子程序因 pipe 緩衝區滿而卡住。
pub fn run_with_timeout(
    mut command: Command,
    timeout: Duration,
) -> Result<ProcessOutput, ThumbnailError> {
    let display = render_command(&command);
    debug!("執行外部指令: {display}");

    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ThumbnailError::ProbeUnavailable(format!("{display}: {e}"))
        } else {
            ThumbnailError::Io(e)
        }
    })?;

    let stdout_reader = spawn_reader(child.stdout.take());
    let stderr_reader = spawn_reader(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait()? {
            Some(status) => break status,
            None if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ThumbnailError::ExternalProcessTimeout {
                    command: display,
                    seconds: timeout.as_secs(),
                });
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    };

    Ok(ProcessOutput {
        success: status.success(),
        stdout: join_reader(stdout_reader),
        stderr: join_reader(stderr_reader),
    })
}

fn spawn_reader<R: Read + Send + 'static>(source: Option<R>) -> Option<JoinHandle<String>> {
    source.map(|mut reader| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = reader.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

fn render_command(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
