//! 面试会话控制器
//!
//! `Session` 是调用方持有的纯数据，`SessionController` 的每个操作都通过
//! `&mut Session` 接收它。状态机：
//!
//! ```text
//! idle -> active <-> paused -> completed
//!   ^-------------- reset ---------------|
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use log::{debug, info};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Answer, Domain, PerformanceSummary, SessionState, TranscriptEntry};
use crate::scoring::{
    self, COMMUNICATION_BAND, IMPROVEMENTS, OVERALL_BAND, PROBLEM_SOLVING_BAND, STRENGTHS, Scorer,
    TECHNICAL_BAND,
};
use crate::timer::{Scheduler, TimerHandle};

/// 一次面试的全部可变状态
#[derive(Debug, Default)]
pub struct Session {
    domain: Option<Arc<Domain>>,
    state: SessionState,
    question_index: usize,
    current_question: Option<String>,
    elapsed_secs: u64,
    answers: Vec<Answer>,
    transcript: Vec<TranscriptEntry>,
    summary: Option<PerformanceSummary>,
    timer: Option<TimerHandle>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn domain(&self) -> Option<&Domain> {
        self.domain.as_deref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn question_count(&self) -> usize {
        self.domain.as_ref().map_or(0, |d| d.question_count())
    }

    pub fn current_question(&self) -> Option<&str> {
        self.current_question.as_deref()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn summary(&self) -> Option<&PerformanceSummary> {
        self.summary.as_ref()
    }

    /// 当前存活的计时器 id
    pub fn timer_id(&self) -> Option<u64> {
        self.timer.as_ref().map(TimerHandle::id)
    }

    fn stop_timer(&mut self) {
        if let Some(mut handle) = self.timer.take() {
            handle.cancel();
        }
    }
}

/// 一次操作的结果
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 当前状态下不允许的操作，或空回答
    Ignored,
    Started,
    Paused,
    Resumed,
    /// 进入下一题（1-based 序号）
    Advanced(usize),
    Completed(PerformanceSummary),
    Reset,
}

pub struct SessionController {
    scheduler: Box<dyn Scheduler>,
    scorer: Box<dyn Scorer>,
    tick_period: Duration,
}

impl SessionController {
    pub fn new(
        scheduler: Box<dyn Scheduler>,
        scorer: Box<dyn Scorer>,
        tick_period: Duration,
    ) -> Self {
        Self {
            scheduler,
            scorer,
            tick_period,
        }
    }

    /// 开始一次面试，只在 idle 状态下有效
    pub fn start(&mut self, session: &mut Session, domain: Arc<Domain>) -> Result<Outcome, AppError> {
        if session.state != SessionState::Idle {
            debug!("start ignored in state {}", session.state.label());
            return Ok(Outcome::Ignored);
        }
        let Some(first) = domain.question(1).map(str::to_string) else {
            return Err(AppError::NoQuestionsAvailable {
                domain: domain.name.clone(),
            });
        };

        info!("interview started: {} ({} questions)", domain.id, domain.question_count());
        session.elapsed_secs = 0;
        session.question_index = 1;
        session.answers.clear();
        session.summary = None;
        session.transcript = vec![TranscriptEntry::system(format!(
            "Welcome to your {} interview! Let's begin with the first question: {}",
            domain.name, first
        ))];
        session.current_question = Some(first);
        session.domain = Some(domain);
        session.state = SessionState::Active;
        self.arm_timer(session);

        Ok(Outcome::Started)
    }

    pub fn pause(&mut self, session: &mut Session) -> Outcome {
        if session.state != SessionState::Active {
            debug!("pause ignored in state {}", session.state.label());
            return Outcome::Ignored;
        }
        session.stop_timer();
        session.state = SessionState::Paused;
        info!("interview paused at {}s", session.elapsed_secs);
        Outcome::Paused
    }

    pub fn resume(&mut self, session: &mut Session) -> Outcome {
        if session.state != SessionState::Paused {
            debug!("resume ignored in state {}", session.state.label());
            return Outcome::Ignored;
        }
        session.state = SessionState::Active;
        self.arm_timer(session);
        info!("interview resumed at {}s", session.elapsed_secs);
        Outcome::Resumed
    }

    /// 提交当前题目的回答
    pub fn submit_answer(&mut self, session: &mut Session, text: &str) -> Outcome {
        if session.state != SessionState::Active || text.trim().is_empty() {
            return Outcome::Ignored;
        }
        let Some(domain) = session.domain.clone() else {
            return Outcome::Ignored;
        };

        session.answers.push(Answer {
            question: session.current_question.clone().unwrap_or_default(),
            answer: text.to_string(),
            elapsed_secs: session.elapsed_secs,
            question_index: session.question_index,
        });
        session.transcript.push(TranscriptEntry::user(text));
        session
            .transcript
            .push(TranscriptEntry::system(scoring::pick_feedback(self.scorer.as_mut())));

        if session.question_index < domain.question_count() {
            session.question_index += 1;
            let next = domain.question(session.question_index).unwrap_or_default().to_string();
            session.transcript.push(TranscriptEntry::system(format!(
                "Great! Here's your next question: {next}"
            )));
            session.current_question = Some(next);
            debug!("advanced to question {}", session.question_index);
            return Outcome::Advanced(session.question_index);
        }

        session.stop_timer();
        session.state = SessionState::Completed;
        let summary = self.summarize(session, &domain);
        session.transcript.push(TranscriptEntry::system(format!(
            "Congratulations! You've completed the interview. Session ends, and final score \
             is displayed. Your overall score is {}/100. Check your performance report for \
             detailed feedback.",
            summary.overall_score
        )));
        session.summary = Some(summary.clone());
        info!(
            "interview completed: {} answers in {}",
            summary.questions_answered,
            summary.total_time()
        );
        Outcome::Completed(summary)
    }

    /// 任何状态下都回到 idle
    pub fn reset(&mut self, session: &mut Session) -> Outcome {
        session.stop_timer();
        *session = Session::new();
        info!("interview reset");
        Outcome::Reset
    }

    /// 计时器回调；只接受当前存活句柄的 tick
    pub fn tick(&mut self, session: &mut Session, timer_id: u64) -> bool {
        if session.state != SessionState::Active || session.timer_id() != Some(timer_id) {
            return false;
        }
        session.elapsed_secs += 1;
        true
    }

    /// 取出当前计时器已到期的 tick 并逐个应用，返回应用的秒数
    pub fn drain_ticks(&mut self, session: &mut Session) -> u64 {
        let Some((id, pending)) = session.timer.as_ref().map(|t| (t.id(), t.pending())) else {
            return 0;
        };
        (0..pending).filter(|_| self.tick(session, id)).count() as u64
    }

    fn arm_timer(&mut self, session: &mut Session) {
        session.stop_timer();
        session.timer = Some(self.scheduler.schedule_repeating(self.tick_period));
    }

    fn summarize(&mut self, session: &Session, domain: &Domain) -> PerformanceSummary {
        let answered = session.answers.len();
        if answered == 0 {
            return PerformanceSummary::empty(&domain.name);
        }
        let avg = (session.elapsed_secs as f64 / answered as f64).round() as u64;

        PerformanceSummary {
            id: Uuid::new_v4().to_string(),
            domain: domain.name.clone(),
            date: Local::now().date_naive(),
            questions_answered: answered,
            total_secs: session.elapsed_secs,
            avg_secs_per_question: avg,
            overall_score: self.scorer.score(OVERALL_BAND),
            technical_score: self.scorer.score(TECHNICAL_BAND),
            communication_score: self.scorer.score(COMMUNICATION_BAND),
            problem_solving_score: self.scorer.score(PROBLEM_SOLVING_BAND),
            strengths: STRENGTHS.iter().map(|s| s.to_string()).collect(),
            improvements: IMPROVEMENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::catalog::default_domains;
    use crate::scoring::{FEEDBACKS, RandomScorer, ScoreBand};
    use crate::timer::TickScheduler;
    use crossbeam_channel::{Sender, TrySendError};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::thread;
    use std::time::Instant;

    /// 手动调度：不会自己产生 tick，只记录发出的句柄以检查取消情况
    #[derive(Default, Clone)]
    pub(crate) struct ManualScheduler {
        next_id: u64,
        issued: Rc<RefCell<Vec<Sender<Instant>>>>,
    }

    impl ManualScheduler {
        /// 接收端仍然存在的句柄数量
        pub(crate) fn live_handles(&self) -> usize {
            self.issued
                .borrow()
                .iter()
                .filter(|tx| {
                    !matches!(
                        tx.try_send(Instant::now()),
                        Err(TrySendError::Disconnected(_))
                    )
                })
                .count()
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule_repeating(&mut self, _period: Duration) -> TimerHandle {
            self.next_id += 1;
            // 零容量通道：检查存活时不会留下消息
            let (tx, rx) = crossbeam_channel::bounded(0);
            self.issued.borrow_mut().push(tx);
            TimerHandle::new(self.next_id, rx)
        }
    }

    /// 固定分数：区间下限
    pub(crate) struct StubScorer;

    impl Scorer for StubScorer {
        fn score(&mut self, band: ScoreBand) -> u8 {
            band.min
        }

        fn pick(&mut self, _len: usize) -> usize {
            0
        }
    }

    fn controller() -> (SessionController, ManualScheduler) {
        let scheduler = ManualScheduler::default();
        let controller = SessionController::new(
            Box::new(scheduler.clone()),
            Box::new(StubScorer),
            Duration::from_secs(1),
        );
        (controller, scheduler)
    }

    fn software_engineering() -> Arc<Domain> {
        Arc::new(default_domains().remove(0))
    }

    fn tick_n(controller: &mut SessionController, session: &mut Session, n: u64) {
        for _ in 0..n {
            if let Some(id) = session.timer_id() {
                controller.tick(session, id);
            }
        }
    }

    #[test]
    fn test_start_every_domain() {
        for domain in default_domains() {
            let (mut controller, _) = controller();
            let mut session = Session::new();
            let first = domain.questions[0].clone();

            let outcome = controller.start(&mut session, Arc::new(domain)).unwrap();
            assert_eq!(outcome, Outcome::Started);
            assert_eq!(session.state(), SessionState::Active);
            assert_eq!(session.question_index(), 1);
            assert_eq!(session.transcript().len(), 1);
            assert!(session.transcript()[0].text.contains(&first));
            assert!(session.timer_id().is_some());
        }
    }

    #[test]
    fn test_start_without_questions() {
        let (mut controller, scheduler) = controller();
        let mut session = Session::new();
        let empty = Arc::new(Domain::new("empty", "Empty", &[]));

        let result = controller.start(&mut session, empty);
        assert!(matches!(result, Err(AppError::NoQuestionsAvailable { .. })));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.question_index(), 0);
        assert!(session.transcript().is_empty());
        assert_eq!(scheduler.live_handles(), 0);
    }

    #[test]
    fn test_second_start_is_noop() {
        let (mut controller, scheduler) = controller();
        let mut session = Session::new();
        controller.start(&mut session, software_engineering()).unwrap();
        controller.submit_answer(&mut session, "REST uses resources");
        let timer = session.timer_id();

        let outcome = controller.start(&mut session, software_engineering()).unwrap();
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.question_index(), 2);
        assert_eq!(session.timer_id(), timer);
        assert_eq!(scheduler.live_handles(), 1);
    }

    #[test]
    fn test_blank_answers_are_noops() {
        let (mut controller, _) = controller();
        let mut session = Session::new();
        controller.start(&mut session, software_engineering()).unwrap();

        for blank in ["", "   ", "\n\t"] {
            assert_eq!(controller.submit_answer(&mut session, blank), Outcome::Ignored);
        }
        assert_eq!(session.transcript().len(), 1);
        assert!(session.answers().is_empty());
        assert_eq!(session.question_index(), 1);
    }

    #[test]
    fn test_submit_appends_and_advances() {
        let (mut controller, _) = controller();
        let mut session = Session::new();
        let domain = software_engineering();
        controller.start(&mut session, domain.clone()).unwrap();
        tick_n(&mut controller, &mut session, 12);

        let outcome = controller.submit_answer(&mut session, "GraphQL has one endpoint");
        assert_eq!(outcome, Outcome::Advanced(2));

        let answer = &session.answers()[0];
        assert_eq!(answer.question, domain.questions[0]);
        assert_eq!(answer.answer, "GraphQL has one endpoint");
        assert_eq!(answer.elapsed_secs, 12);
        assert_eq!(answer.question_index, 1);

        // 欢迎语 + 用户回答 + 反馈 + 下一题
        let texts: Vec<&str> = session.transcript().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts.len(), 4);
        assert_eq!(texts[1], "GraphQL has one endpoint");
        assert_eq!(texts[2], FEEDBACKS[0]);
        assert!(texts[3].contains(&domain.questions[1]));
        assert_eq!(session.current_question(), Some(domain.questions[1].as_str()));
    }

    #[test]
    fn test_submit_ignored_unless_active() {
        let (mut controller, _) = controller();
        let mut session = Session::new();
        assert_eq!(controller.submit_answer(&mut session, "hello"), Outcome::Ignored);

        controller.start(&mut session, software_engineering()).unwrap();
        controller.pause(&mut session);
        assert_eq!(controller.submit_answer(&mut session, "hello"), Outcome::Ignored);
        assert!(session.answers().is_empty());
    }

    #[test]
    fn test_full_interview_completes() {
        let (mut controller, scheduler) = controller();
        let mut session = Session::new();
        controller.start(&mut session, software_engineering()).unwrap();

        let mut completed = Vec::new();
        for i in 0..5 {
            tick_n(&mut controller, &mut session, 30);
            if let Outcome::Completed(summary) =
                controller.submit_answer(&mut session, &format!("answer {i}"))
            {
                completed.push(summary);
            }
        }

        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(session.answers().len(), 5);
        assert_eq!(completed.len(), 1);
        let summary = &completed[0];
        assert_eq!(summary.questions_answered, 5);
        assert_eq!(summary.domain, "Software Engineering");
        assert_eq!(summary.total_time(), "02:30");
        assert_eq!(summary.avg_time_per_question(), "00:30");
        assert_eq!(summary.overall_score, OVERALL_BAND.min);
        assert_eq!(session.summary(), Some(summary));
        assert!(session.timer_id().is_none());
        assert_eq!(scheduler.live_handles(), 0);

        let last = session.transcript().last().unwrap();
        assert!(last.text.contains("Session ends, and final score is displayed."));
        assert!(last.text.contains("70/100"));

        // 完成后不再接受回答，也不再重算报告
        assert_eq!(controller.submit_answer(&mut session, "extra"), Outcome::Ignored);
        assert_eq!(session.answers().len(), 5);
    }

    #[test]
    fn test_software_engineering_with_random_scores() {
        let mut controller = SessionController::new(
            Box::new(ManualScheduler::default()),
            Box::new(RandomScorer::new()),
            Duration::from_secs(1),
        );
        let mut session = Session::new();
        controller.start(&mut session, software_engineering()).unwrap();
        for _ in 0..5 {
            controller.submit_answer(&mut session, "a thoughtful answer");
        }

        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(session.answers().len(), 5);
        let summary = session.summary().unwrap();
        assert!(OVERALL_BAND.contains(summary.overall_score));
        assert!(TECHNICAL_BAND.contains(summary.technical_score));
        assert!(COMMUNICATION_BAND.contains(summary.communication_score));
        assert!(PROBLEM_SOLVING_BAND.contains(summary.problem_solving_score));
        let total = summary.total_time();
        assert_eq!(total.len(), 5);
        assert_eq!(&total[2..3], ":");
    }

    #[test]
    fn test_pause_resume_preserves_elapsed() {
        let (mut controller, scheduler) = controller();
        let mut session = Session::new();
        controller.start(&mut session, software_engineering()).unwrap();
        tick_n(&mut controller, &mut session, 42);
        let old_timer = session.timer_id().unwrap();

        assert_eq!(controller.pause(&mut session), Outcome::Paused);
        assert_eq!(session.elapsed_secs(), 42);
        assert_eq!(scheduler.live_handles(), 0);

        // 暂停期间残留的 tick 被丢弃
        assert!(!controller.tick(&mut session, old_timer));
        assert_eq!(session.elapsed_secs(), 42);

        assert_eq!(controller.resume(&mut session), Outcome::Resumed);
        assert_eq!(session.elapsed_secs(), 42);
        let new_timer = session.timer_id().unwrap();
        assert_ne!(old_timer, new_timer);
        assert!(!controller.tick(&mut session, old_timer));
        assert!(controller.tick(&mut session, new_timer));
        assert_eq!(session.elapsed_secs(), 43);
        assert_eq!(scheduler.live_handles(), 1);
    }

    #[test]
    fn test_invalid_pause_resume() {
        let (mut controller, _) = controller();
        let mut session = Session::new();
        assert_eq!(controller.pause(&mut session), Outcome::Ignored);
        assert_eq!(controller.resume(&mut session), Outcome::Ignored);

        controller.start(&mut session, software_engineering()).unwrap();
        assert_eq!(controller.resume(&mut session), Outcome::Ignored);
        controller.pause(&mut session);
        assert_eq!(controller.pause(&mut session), Outcome::Ignored);
        assert_eq!(session.state(), SessionState::Paused);
    }

    #[test]
    fn test_reset_from_any_state() {
        let (mut controller, scheduler) = controller();
        let mut session = Session::new();

        let check = |controller: &mut SessionController, session: &mut Session| {
            assert_eq!(controller.reset(session), Outcome::Reset);
            assert_eq!(session.state(), SessionState::Idle);
            assert_eq!(session.question_index(), 0);
            assert_eq!(session.elapsed_secs(), 0);
            assert!(session.transcript().is_empty());
            assert!(session.answers().is_empty());
            assert!(session.summary().is_none());
            assert!(session.timer_id().is_none());
        };

        check(&mut controller, &mut session);

        controller.start(&mut session, software_engineering()).unwrap();
        tick_n(&mut controller, &mut session, 5);
        controller.submit_answer(&mut session, "one");
        check(&mut controller, &mut session);

        controller.start(&mut session, software_engineering()).unwrap();
        controller.pause(&mut session);
        check(&mut controller, &mut session);

        controller.start(&mut session, software_engineering()).unwrap();
        for _ in 0..5 {
            controller.submit_answer(&mut session, "done");
        }
        assert_eq!(session.state(), SessionState::Completed);
        check(&mut controller, &mut session);

        assert_eq!(scheduler.live_handles(), 0);
    }

    #[test]
    fn test_stale_timer_after_reset_and_restart() {
        let (mut controller, scheduler) = controller();
        let mut session = Session::new();
        controller.start(&mut session, software_engineering()).unwrap();
        let first = session.timer_id().unwrap();
        controller.reset(&mut session);
        controller.start(&mut session, software_engineering()).unwrap();

        assert!(!controller.tick(&mut session, first));
        assert_eq!(session.elapsed_secs(), 0);
        assert_eq!(scheduler.live_handles(), 1);
    }

    #[test]
    fn test_question_index_monotonic() {
        let (mut controller, _) = controller();
        let mut session = Session::new();
        controller.start(&mut session, software_engineering()).unwrap();
        let mut last = session.question_index();
        for _ in 0..8 {
            controller.submit_answer(&mut session, "x");
            assert!(session.question_index() >= last);
            assert!(session.question_index() <= session.question_count());
            last = session.question_index();
        }
        assert_eq!(last, 5);
    }

    #[test]
    fn test_drain_ticks_follows_live_timer() {
        let mut controller = SessionController::new(
            Box::new(TickScheduler::new()),
            Box::new(StubScorer),
            Duration::from_millis(5),
        );
        let mut session = Session::new();
        assert_eq!(controller.drain_ticks(&mut session), 0);

        controller.start(&mut session, software_engineering()).unwrap();
        thread::sleep(Duration::from_millis(30));
        let applied = controller.drain_ticks(&mut session);
        assert!(applied >= 1);
        assert_eq!(session.elapsed_secs(), applied);

        controller.pause(&mut session);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(controller.drain_ticks(&mut session), 0);
        assert_eq!(session.elapsed_secs(), applied);

        controller.resume(&mut session);
        thread::sleep(Duration::from_millis(30));
        assert!(controller.drain_ticks(&mut session) >= 1);

        controller.reset(&mut session);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(controller.drain_ticks(&mut session), 0);
        assert_eq!(session.elapsed_secs(), 0);
    }
}
