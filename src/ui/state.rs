//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use std::sync::Arc;

use crate::auth::{UserAccount, UserDirectory};
use crate::models::{Domain, PerformanceSummary};
use crate::session::{Session, SessionController};

/// 应用状态
pub struct App {
    pub domains: Vec<Arc<Domain>>,
    pub users: UserDirectory,
    pub controller: SessionController,
    pub session: Session,
    pub reports: Vec<PerformanceSummary>,
    pub current_user: Option<UserAccount>,
    pub screen: Screen,
    pub mode: AppMode,
    pub selected_index: usize,
    pub login: LoginForm,
    pub input_buffer: String, // 当前回答
    pub message: Option<String>,
}

/// 当前页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
    Interview,
    Reports,
    Admin,
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    Alert(String), // 阻塞式提示，需确认后关闭
}

/// 登录表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub field: LoginField,
    pub error: Option<String>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            field: LoginField::Username,
            error: None,
        }
    }
}

impl LoginForm {
    pub fn focused_mut(&mut self) -> &mut String {
        match self.field {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn clear(&mut self) {
        self.username.clear();
        self.password.clear();
        self.field = LoginField::Username;
    }
}

impl App {
    /// 创建新的应用实例
    pub fn new(domains: Vec<Domain>, users: UserDirectory, controller: SessionController) -> Self {
        Self {
            domains: domains.into_iter().map(Arc::new).collect(),
            users,
            controller,
            session: Session::new(),
            reports: Vec::new(),
            current_user: None,
            screen: Screen::Login,
            mode: AppMode::Normal,
            selected_index: 0,
            login: LoginForm::default(),
            input_buffer: String::new(),
            message: None,
        }
    }

    /// 获取当前选中的领域
    pub fn selected_domain(&self) -> Option<&Arc<Domain>> {
        self.domains.get(self.selected_index)
    }

    pub fn is_admin(&self) -> bool {
        self.current_user.as_ref().is_some_and(UserAccount::is_admin)
    }

    /// 所有报告的平均总分
    pub fn average_score(&self) -> u32 {
        if self.reports.is_empty() {
            return 0;
        }
        let total: u32 = self.reports.iter().map(|r| u32::from(r.overall_score)).sum();
        (f64::from(total) / self.reports.len() as f64).round() as u32
    }
}
