//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::state::{App, AppMode, LoginField, Screen};
use crate::models::{Author, PerformanceSummary, SessionState, format_clock};
use components::{render_dialog_framework, render_input_widget, score_bar};
use layouts::{centered_rect, wrapped_height};

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    if app.screen == Screen::Login {
        render_login(frame, app);
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // 导航栏
                Constraint::Min(10),   // 主体
                Constraint::Length(3), // 帮助
            ])
            .split(frame.area());

        render_nav(frame, app, chunks[0]);
        match app.screen {
            Screen::Dashboard => render_dashboard(frame, app, chunks[1]),
            Screen::Interview => render_interview(frame, app, chunks[1]),
            Screen::Reports => render_reports(frame, app, chunks[1]),
            Screen::Admin => render_admin(frame, app, chunks[1]),
            Screen::Login => {}
        }
        render_help(frame, app, chunks[2]);
    }

    // 渲染弹窗
    if let AppMode::Alert(text) = &app.mode {
        render_alert(frame, text);
    }
}

fn render_login(frame: &mut Frame, app: &App) {
    let area = centered_rect(50, 60, frame.area());
    let inner = render_dialog_framework(frame, area, "🔒 AI Interview Platform", Color::Cyan);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(4),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new("Please sign in to continue").style(Style::default().fg(Color::Gray)),
        chunks[0],
    );

    render_input_widget(
        frame,
        chunks[1],
        "Username",
        &app.login.username,
        app.login.field == LoginField::Username,
        Color::Yellow,
    );
    let masked = "•".repeat(app.login.password.chars().count());
    render_input_widget(
        frame,
        chunks[2],
        "Password",
        &masked,
        app.login.field == LoginField::Password,
        Color::Yellow,
    );

    if let Some(error) = &app.login.error {
        frame.render_widget(
            Paragraph::new(error.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true }),
            chunks[3],
        );
    }

    let demo = app
        .users
        .users()
        .iter()
        .map(|u| format!("{} / {}", u.username, u.password))
        .collect::<Vec<_>>()
        .join("   ");
    let hint = format!(
        "[Tab] switch field  [Enter] sign in  [Esc] quit\n\
         [F1] user  [F2] admin  [F3] test quick login\n\nDemo: {demo}"
    );
    frame.render_widget(
        Paragraph::new(hint)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true }),
        chunks[4],
    );
}

fn render_nav(frame: &mut Frame, app: &App, area: Rect) {
    let tab = |label: &'static str, screen: Screen| {
        let style = if app.screen == screen {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        Span::styled(format!(" {label} "), style)
    };

    let mut spans = vec![
        Span::styled(
            "🎯 AI Interview Platform  ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        tab("Dashboard", Screen::Dashboard),
        Span::raw(" "),
        tab("Interview", Screen::Interview),
        Span::raw(" "),
        tab("Reports", Screen::Reports),
    ];
    if app.is_admin() {
        spans.push(Span::raw(" "));
        spans.push(tab("Admin", Screen::Admin));
    }
    if let Some(user) = &app.current_user {
        spans.push(Span::styled(
            format!("   👤 {}", user.name),
            Style::default().fg(Color::Green),
        ));
    }

    let nav = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(nav, area);
}

fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let items: Vec<ListItem> = app
        .domains
        .iter()
        .enumerate()
        .map(|(i, domain)| {
            let marker = if i == app.selected_index { "●" } else { "○" };
            let content = format!(
                "{} {} ({} questions)",
                marker,
                domain.name,
                domain.question_count()
            );
            let style = if i == app.selected_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![Span::styled(content, style)]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title("Choose Interview Domain").borders(Borders::ALL));
    let mut state = ListState::default();
    state.select(Some(app.selected_index));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let welcome = app
        .current_user
        .as_ref()
        .map(|u| format!("Welcome back, {}!", u.name))
        .unwrap_or_default();
    let selected = app
        .selected_domain()
        .map(|d| d.name.as_str())
        .unwrap_or("No domain selected");

    let mut lines = vec![
        Line::from(Span::styled(
            welcome,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Selected Domain: {selected}")),
        Line::from(""),
        Line::from("[Enter] Start Interview   [r] View Reports"),
    ];
    if app.session.state().is_in_progress() {
        lines.push(Line::from(Span::styled(
            format!(
                "Interview {} ({}), press [i] to return",
                app.session.state().label(),
                format_clock(app.session.elapsed_secs())
            ),
            Style::default().fg(Color::Yellow),
        )));
    }
    if !app.reports.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Your Progress",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!(
            "Interviews completed: {}",
            app.reports.len()
        )));
        lines.push(Line::from(format!("Average score: {}", app.average_score())));
    }

    let details = Paragraph::new(lines)
        .block(Block::default().title("Overview").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(details, chunks[1]);
}

fn render_interview(frame: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 状态栏
            Constraint::Length(3), // 当前题目
            Constraint::Min(5),    // 对话
            Constraint::Length(5), // 回答
        ])
        .split(area);

    let state_color = match session.state() {
        SessionState::Active => Color::Green,
        SessionState::Paused => Color::Yellow,
        SessionState::Completed => Color::Cyan,
        SessionState::Idle => Color::Gray,
    };
    let domain = session.domain().map(|d| d.name.as_str()).unwrap_or("-");
    let header = Line::from(vec![
        Span::styled(
            format!("{domain} Interview"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "   Question {} of {}",
            session.question_index(),
            session.question_count()
        )),
        Span::raw(format!("   ⏱ {}", format_clock(session.elapsed_secs()))),
        Span::styled(
            format!("   [{}]", session.state().label()),
            Style::default().fg(state_color),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(header).block(Block::default().borders(Borders::ALL)),
        chunks[0],
    );

    let question = Paragraph::new(session.current_question().unwrap_or("-"))
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().title("Current Question").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(question, chunks[1]);

    render_transcript(frame, app, chunks[2]);

    match session.state() {
        SessionState::Active | SessionState::Paused => {
            let active = session.state() == SessionState::Active;
            let title = format!(
                "Your Answer ({} characters)",
                app.input_buffer.chars().count()
            );
            let value = if active {
                app.input_buffer.as_str()
            } else {
                "Interview paused. Press [Tab] to resume."
            };
            render_input_widget(frame, chunks[3], &title, value, active, Color::Yellow);
        }
        SessionState::Completed => {
            let score = session
                .summary()
                .map(|s| format!("  Overall {}/100 in {}", s.overall_score, s.total_time()))
                .unwrap_or_default();
            let done = Paragraph::new(format!(
                "Interview Completed! {} answers recorded.{score}\n\
                 [r] View Report   [n] Start New Interview",
                session.answers().len()
            ))
            .style(Style::default().fg(Color::Green))
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(done, chunks[3]);
        }
        SessionState::Idle => {
            let idle = Paragraph::new("No interview in progress. Press [Enter] to start.")
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(idle, chunks[3]);
        }
    }
}

fn render_transcript(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width.saturating_sub(2);
    let mut lines = Vec::new();
    let mut height: u16 = 0;

    for entry in app.session.transcript() {
        let (label, color) = match entry.author {
            Author::System => ("🤖 Interviewer", Color::Cyan),
            Author::User => ("👤 You", Color::Blue),
        };
        lines.push(Line::from(vec![
            Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("  {}", entry.timestamp.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.extend(entry.text.lines().map(Line::from));
        lines.push(Line::from(""));
        height = height
            .saturating_add(2)
            .saturating_add(wrapped_height(&entry.text, width));
    }

    // 始终滚动到最新消息
    let visible = area.height.saturating_sub(2);
    let scroll = height.saturating_sub(visible);

    let transcript = Paragraph::new(lines)
        .block(Block::default().title("Transcript").borders(Borders::ALL))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(transcript, area);
}

fn report_lines(report: &PerformanceSummary) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} Interview", report.domain),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("   {}", report.date.format("%Y-%m-%d"))),
            Span::styled(
                format!("   {}/100", report.overall_score),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!(
            "Questions: {}   Total time: {}   Avg per question: {}",
            report.questions_answered,
            report.total_time(),
            report.avg_time_per_question()
        )),
        Line::from(score_bar("Technical", report.technical_score)),
        Line::from(score_bar("Communication", report.communication_score)),
        Line::from(score_bar("Problem Solving", report.problem_solving_score)),
        Line::from(Span::styled("Strengths", Style::default().fg(Color::Green))),
    ];
    lines.extend(report.strengths.iter().map(|s| Line::from(format!("  ✓ {s}"))));
    lines.push(Line::from(Span::styled(
        "Areas for Improvement",
        Style::default().fg(Color::Yellow),
    )));
    lines.extend(
        report
            .improvements
            .iter()
            .map(|s| Line::from(format!("  ✗ {s}"))),
    );
    lines.push(Line::from(""));
    lines
}

fn render_reports(frame: &mut Frame, app: &App, area: Rect) {
    let content: Vec<Line> = if app.reports.is_empty() {
        vec![
            Line::from("No interview reports yet."),
            Line::from("Complete an interview to see your performance report here."),
        ]
    } else {
        // 最新的报告排在前面
        app.reports.iter().rev().flat_map(report_lines).collect()
    };

    let reports = Paragraph::new(content)
        .block(Block::default().title("Performance Reports").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(reports, area);
}

fn render_admin(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Question Banks",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    lines.extend(app.domains.iter().map(|d| {
        Line::from(format!(
            "  {:<24} {} questions",
            d.name,
            d.question_count()
        ))
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "System Stats",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(format!("  Registered users: {}", app.users.users().len())));
    lines.push(Line::from(format!("  Completed interviews: {}", app.reports.len())));
    lines.push(Line::from(format!("  Average score: {}", app.average_score())));

    let admin = Paragraph::new(lines)
        .block(Block::default().title("🛡 Admin Panel").borders(Borders::ALL));
    frame.render_widget(admin, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.screen {
        Screen::Login => "",
        Screen::Dashboard => {
            if app.is_admin() {
                "[j/k] select  [Enter] start  [i] interview  [r] reports  [a] admin  [l] logout  [q] quit"
            } else {
                "[j/k] select  [Enter] start  [i] interview  [r] reports  [l] logout  [q] quit"
            }
        }
        Screen::Interview => match app.session.state() {
            SessionState::Active => "[Enter] submit  [Tab] pause  [F5] reset  [Esc] dashboard",
            SessionState::Paused => "[Tab] resume  [F5] reset  [Esc] dashboard",
            SessionState::Completed => "[r] report  [n] new interview  [Esc] dashboard",
            SessionState::Idle => "[Enter] start  [Esc] dashboard",
        },
        Screen::Reports | Screen::Admin => "[Esc] dashboard  [q] quit",
    };

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_alert(frame: &mut Frame, text: &str) {
    let area = centered_rect(50, 20, frame.area());
    let inner = render_dialog_framework(frame, area, "⚠️ Alert", Color::Red);

    let dialog = Paragraph::new(format!("{}\n\n[Enter] OK", text))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });

    frame.render_widget(dialog, inner);
}
