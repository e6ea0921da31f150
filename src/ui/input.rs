//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, AppMode, Screen};
use crate::models::SessionState;

/// 根据当前页面、模式和按键获取对应的 Action
pub fn get_action(app: &App, key: KeyCode) -> Option<Action> {
    if let AppMode::Alert(_) = app.mode {
        return match key {
            KeyCode::Enter | KeyCode::Esc => Some(Action::Dismiss),
            _ => None,
        };
    }

    match app.screen {
        Screen::Login => match key {
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => Some(Action::SwitchField),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::F(1) => Some(Action::QuickLogin("user1")),
            KeyCode::F(2) => Some(Action::QuickLogin("admin")),
            KeyCode::F(3) => Some(Action::QuickLogin("testuser")),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
        Screen::Dashboard => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Enter | KeyCode::Char('s') => Some(Action::StartInterview),
            KeyCode::Char('i') => Some(Action::Navigate(Screen::Interview)),
            KeyCode::Char('r') => Some(Action::Navigate(Screen::Reports)),
            KeyCode::Char('a') => Some(Action::Navigate(Screen::Admin)),
            KeyCode::Char('l') => Some(Action::Logout),
            _ => None,
        },
        Screen::Interview => match app.session.state() {
            SessionState::Active => match key {
                KeyCode::Esc => Some(Action::Navigate(Screen::Dashboard)),
                KeyCode::Tab => Some(Action::TogglePause),
                KeyCode::F(5) => Some(Action::ResetInterview),
                KeyCode::Enter => Some(Action::Submit),
                KeyCode::Backspace => Some(Action::DeleteChar),
                KeyCode::Char(c) => Some(Action::Input(c)),
                _ => None,
            },
            SessionState::Paused => match key {
                KeyCode::Esc => Some(Action::Navigate(Screen::Dashboard)),
                KeyCode::Tab => Some(Action::TogglePause),
                KeyCode::F(5) => Some(Action::ResetInterview),
                _ => None,
            },
            SessionState::Completed => match key {
                KeyCode::Esc => Some(Action::Navigate(Screen::Dashboard)),
                KeyCode::Char('r') => Some(Action::Navigate(Screen::Reports)),
                KeyCode::Char('n') => Some(Action::ResetInterview),
                _ => None,
            },
            SessionState::Idle => match key {
                KeyCode::Esc => Some(Action::Navigate(Screen::Dashboard)),
                KeyCode::Enter | KeyCode::Char('s') => Some(Action::StartInterview),
                _ => None,
            },
        },
        Screen::Reports | Screen::Admin => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Esc | KeyCode::Char('d') => Some(Action::Navigate(Screen::Dashboard)),
            _ => None,
        },
    }
}

/// 处理按键事件，返回 true 表示退出
pub fn handle_key_event(app: &mut App, key: KeyCode) -> bool {
    if let Some(action) = get_action(app, key) {
        app.dispatch(action)
    } else {
        false
    }
}
