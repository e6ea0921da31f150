use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 面试会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Idle, // 未开始
    Active,
    Paused,
    Completed,
}

impl SessionState {
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Active => "active",
            SessionState::Paused => "paused",
            SessionState::Completed => "completed",
        }
    }

    /// 会话是否处于进行中（含暂停与已完成）
    pub fn is_in_progress(&self) -> bool {
        !matches!(self, SessionState::Idle)
    }
}

/// 面试领域（题库）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub questions: Vec<String>,
}

impl Domain {
    pub fn new(id: &str, name: &str, questions: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            questions: questions.iter().map(|q| q.to_string()).collect(),
        }
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// 按 1-based 序号取题
    pub fn question(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.questions.get(i))
            .map(String::as_str)
    }
}

/// 对话记录的作者
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    System,
    User,
}

/// 对话记录条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub author: Author,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl TranscriptEntry {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            author: Author::System,
            text: text.into(),
            timestamp: Local::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            author: Author::User,
            text: text.into(),
            timestamp: Local::now(),
        }
    }
}

/// 已提交的回答，创建后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question: String,
    pub answer: String,
    pub elapsed_secs: u64,
    pub question_index: usize,
}

/// 面试结束时生成的表现报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub id: String,
    pub domain: String,
    pub date: NaiveDate,
    pub questions_answered: usize,
    pub total_secs: u64,
    pub avg_secs_per_question: u64,
    pub overall_score: u8,
    pub technical_score: u8,
    pub communication_score: u8,
    pub problem_solving_score: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

impl PerformanceSummary {
    /// 没有任何回答时的空报告
    pub fn empty(domain: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            domain: domain.to_string(),
            date: Local::now().date_naive(),
            questions_answered: 0,
            total_secs: 0,
            avg_secs_per_question: 0,
            overall_score: 0,
            technical_score: 0,
            communication_score: 0,
            problem_solving_score: 0,
            strengths: vec!["No data available".to_string()],
            improvements: vec!["Complete an interview first".to_string()],
        }
    }

    pub fn total_time(&self) -> String {
        format_clock(self.total_secs)
    }

    pub fn avg_time_per_question(&self) -> String {
        format_clock(self.avg_secs_per_question)
    }
}

/// 秒数格式化为 `MM:SS`
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
