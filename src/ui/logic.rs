//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和各种业务处理方法

use log::info;

use super::actions::Action;
use super::state::{App, AppMode, LoginField, Screen};
use crate::auth::UserAccount;
use crate::error::AppError;
use crate::models::SessionState;
use crate::session::Outcome;

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        let before = self.session.state();

        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::SwitchField => self.switch_field(),
            Action::QuickLogin(username) => self.quick_login(username),
            Action::Logout => self.logout(),

            Action::StartInterview => self.start_interview(),
            Action::TogglePause => self.toggle_pause(),
            Action::ResetInterview => self.reset_interview(),

            Action::Navigate(screen) => self.navigate(screen),

            Action::Dismiss => self.mode = AppMode::Normal,

            Action::Submit => match self.screen {
                Screen::Login => self.login(),
                Screen::Interview => self.submit_answer(),
                _ => {}
            },

            Action::Input(c) => {
                if let Some(buffer) = self.focused_input() {
                    buffer.push(c);
                }
            }

            Action::DeleteChar => {
                if let Some(buffer) = self.focused_input() {
                    buffer.pop();
                }
            }
        }

        // 会话状态变化且仍在进行中时，自动切到面试页
        let after = self.session.state();
        if after != before && after.is_in_progress() && self.current_user.is_some() {
            self.screen = Screen::Interview;
        }
        false
    }

    /// 应用计时器已到期的 tick
    pub fn poll_timer(&mut self) -> u64 {
        self.controller.drain_ticks(&mut self.session)
    }

    fn focused_input(&mut self) -> Option<&mut String> {
        match self.screen {
            Screen::Login => Some(self.login.focused_mut()),
            Screen::Interview if self.session.state() == SessionState::Active => {
                Some(&mut self.input_buffer)
            }
            _ => None,
        }
    }

    // ============ 导航相关 ============

    /// 向上移动选择
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// 向下移动选择
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.domains.len() {
            self.selected_index += 1;
        }
    }

    pub fn navigate(&mut self, screen: Screen) {
        if self.current_user.is_none() {
            return;
        }
        if screen == Screen::Admin && !self.is_admin() {
            self.message = Some("Admin access required".to_string());
            return;
        }
        self.screen = screen;
        self.message = None;
    }

    // ============ 登录相关 ============

    pub fn switch_field(&mut self) {
        self.login.field = match self.login.field {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    /// 使用表单中的用户名密码登录
    pub fn login(&mut self) {
        match self
            .users
            .authenticate(&self.login.username, &self.login.password)
        {
            Ok(account) => self.sign_in(account),
            Err(e) => {
                // 只显示内联错误，会话不受影响
                self.login.error = Some(e.to_string());
                self.login.password.clear();
            }
        }
    }

    pub fn quick_login(&mut self, username: &str) {
        match self.users.quick_login(username) {
            Ok(account) => self.sign_in(account),
            Err(e) => self.login.error = Some(e.to_string()),
        }
    }

    fn sign_in(&mut self, account: UserAccount) {
        self.message = Some(format!("Welcome back, {}!", account.name));
        self.current_user = Some(account);
        self.login.clear();
        self.login.error = None;
        self.screen = Screen::Dashboard;
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            info!("user {} signed out", user.username);
        }
        self.controller.reset(&mut self.session);
        self.input_buffer.clear();
        self.message = None;
        self.screen = Screen::Login;
    }

    // ============ 面试相关 ============

    /// 以当前选中的领域开始面试
    pub fn start_interview(&mut self) {
        if self.current_user.is_none() {
            self.login.error = Some(AppError::LoginRequired.to_string());
            return;
        }
        let Some(domain) = self.selected_domain().cloned() else {
            self.mode = AppMode::Alert("No domain selected.".to_string());
            return;
        };

        match self.controller.start(&mut self.session, domain) {
            Ok(Outcome::Started) => {
                self.input_buffer.clear();
                self.message = None;
            }
            Ok(_) => {
                self.message = Some("An interview is already in progress".to_string());
                self.screen = Screen::Interview;
            }
            Err(e) => self.mode = AppMode::Alert(e.to_string()),
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.session.state() {
            SessionState::Active => {
                self.controller.pause(&mut self.session);
            }
            SessionState::Paused => {
                self.controller.resume(&mut self.session);
            }
            _ => {}
        }
    }

    pub fn reset_interview(&mut self) {
        self.controller.reset(&mut self.session);
        self.input_buffer.clear();
        self.message = None;
        self.screen = Screen::Dashboard;
    }

    /// 提交回答；空回答保持输入框不变
    pub fn submit_answer(&mut self) {
        match self
            .controller
            .submit_answer(&mut self.session, &self.input_buffer)
        {
            Outcome::Ignored => {}
            Outcome::Completed(summary) => {
                self.input_buffer.clear();
                self.message = Some(format!(
                    "Interview complete: {}/100. Press [r] for the report",
                    summary.overall_score
                ));
                self.reports.push(summary);
            }
            _ => self.input_buffer.clear(),
        }
    }
}
