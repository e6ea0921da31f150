mod auth;
mod catalog;
mod config;
mod error;
mod logging;
mod models;
mod scoring;
mod session;
mod timer;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::prelude::*;

use crate::auth::UserDirectory;
use crate::config::{AppConfig, config_path, load_config};
use crate::error::AppError;
use crate::scoring::RandomScorer;
use crate::session::SessionController;
use crate::timer::TickScheduler;
use crate::ui::{App, render};

/// 等待按键的最长时间，超时后处理计时器消息
const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<(), AppError> {
    // 配置文件 (~/.config/mockview/config.toml)，不存在时使用内置题库
    let config = match config_path() {
        Some(path) => load_config(&path)?,
        None => AppConfig::default(),
    };
    if !logging::init(config.log_file.as_deref()) {
        eprintln!("mockview: log file unavailable, logging disabled");
    }
    info!("mockview starting up ({} domains)", config.domains.len());

    let controller = SessionController::new(
        Box::new(TickScheduler::new()),
        Box::new(RandomScorer::new()),
        config.tick_interval,
    );

    // 创建应用状态
    let mut app = App::new(config.domains, UserDirectory::new(config.users), controller);

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("mockview exiting, {} reports this run", app.reports.len());
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), AppError> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && ui::handle_key_event(app, key.code) {
                    break;
                }
            }
        }

        // 计时器只产生 tick，状态修改都在这里完成
        app.poll_timer();
    }
    Ok(())
}
