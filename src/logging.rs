//! 日志初始化
//!
//! 终端被 TUI 占用，日志写入文件。级别读取 `RUST_LOG`，默认 `info`。
//! 日志文件不可用时关闭日志，不影响启动。

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// 初始化日志，返回是否成功写入文件
pub fn init(log_file: Option<&Path>) -> bool {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));

    let enabled = match log_file.map(open_log_file) {
        Some(Ok(file)) => {
            builder.target(Target::Pipe(Box::new(file)));
            true
        }
        // 没有可写位置时关闭日志，避免破坏界面
        Some(Err(_)) | None => {
            builder.filter_level(log::LevelFilter::Off);
            false
        }
    };

    // 重复初始化不是错误
    let _ = builder.try_init();
    enabled
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
