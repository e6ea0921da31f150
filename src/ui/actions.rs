//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

use super::state::Screen;

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,

    // 登录
    SwitchField,
    QuickLogin(&'static str),
    Logout,

    // 面试流程
    StartInterview,
    TogglePause,
    ResetInterview,

    // 页面切换
    Navigate(Screen),

    // 表单/通用交互
    Dismiss,     // 关闭提示框
    Submit,      // Enter
    Input(char), // 输入字符
    DeleteChar,  // Backspace
}
