//! # Music Theory Trainer - Desktop GUI
//!
//! This module contains the main GUI application for the music theory trainer.
//! It lets the learner pick a root and a scale, chord or cadence, shows the
//! notes on a piano keyboard and the circle of fifths, plays them, runs ear
//! training quizzes and self-check practice drills, and keeps the learner's
//! progress.
//!
//! ## Architecture
//! - **Main Thread**: Iced GUI application with dark theme
//! - **Audio Thread**: Dedicated thread owning the CPAL output stream
//! - **Communication**: Crossbeam channels carrying playback plans
//! - **State**: Progress store loaded at start-up and saved after every change

mod audio;
mod lesson;
mod settings;
mod ui;

use audio::AudioWorker;
use chrono::{Local, NaiveDate};
use iced::{self, Element, Subscription, Task, Theme};
use lesson::{build_lesson, Lesson, LessonMode, PracticeTarget, Selection};
use settings::Settings;
use std::time::{Duration, Instant};
use theory_core::playback::{NoteEvent, PlaybackPlan};
use theory_core::practice::{self, PracticeKind};
use theory_core::progress::ProgressStore;
use theory_core::quiz::{QuizKind, QuizSession};
use theory_core::{CadenceType, ChordType, PitchClass, ScaleType};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::main_display::create_main_view;

/// How often the playback indicator is refreshed while something plays.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Main entry point for the trainer.
///
/// Installs the tracing subscriber, then runs the Iced application with the
/// dark theme. Window close requests are routed through `Message::Exit` so
/// the audio thread is shut down before the process ends.
pub fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "theory_gui=info,theory_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("starting music theory trainer");
    let result = iced::application("Music Theory Trainer", TrainerApp::update, TrainerApp::view)
        .subscription(TrainerApp::subscription)
        .theme(TrainerApp::theme)
        .exit_on_close_request(false)
        .run();
    info!("application finished with result: {:?}", result);
    result
}

/// Application message types for the Iced GUI framework.
#[derive(Debug, Clone)]
pub enum Message {
    // Lesson selectors
    ModeSelected(LessonMode),
    RootSelected(PitchClass),
    ScaleSelected(ScaleType),
    ChordSelected(ChordType),
    CadenceSelected(CadenceType),

    // Visualizations
    KeyPressed(i32),              // MIDI number of a clicked piano key
    CircleKeySelected(PitchClass),

    // Lesson actions
    Play,
    Stop,
    MarkPracticed,

    // Practice drills
    PracticeKindSelected(PracticeKind),
    NewChallenge,
    ShowAnswer,
    ResetChallenge,

    // Ear training
    StartQuiz(QuizKind),
    QuizReplay,
    QuizAnswer(&'static str),
    QuizNext,
    QuizClose,

    // Application control
    Tick,
    Exit,
}

/// An ear training quiz as the panel shows it.
#[derive(Debug, Clone)]
pub struct QuizState {
    pub session: QuizSession,
    /// Verdict on the answer given to the current question.
    pub verdict: Option<bool>,
}

/// UI-specific data needed for rendering the interface.
#[derive(Debug, Clone)]
pub struct AppDisplayData {
    pub audio_worker_active: bool,
    pub selection: Selection,
    pub lesson: Option<Lesson>,
    pub lesson_error: Option<String>,
    pub pressed_key: Option<i32>,
    pub playing: bool,
    pub keyboard_octaves: u8,
    pub quiz: Option<QuizState>,
    pub progress: ProgressStore,
    pub today: NaiveDate,
}

/// Main application state.
#[derive(Debug)]
struct TrainerApp {
    audio_worker: Option<AudioWorker>,
    settings: Settings,
    /// When the plan being played will have finished.
    playing_until: Option<Instant>,

    // Single source of truth for all display data
    display_data: AppDisplayData,
}

impl Default for TrainerApp {
    /// Loads settings and progress, builds the first lesson and starts the
    /// audio thread.
    fn default() -> Self {
        let settings = Settings::load();
        let progress = match ProgressStore::load(&settings.progress_path) {
            Ok(store) => store,
            Err(e) => {
                warn!("could not load progress, starting fresh: {e}");
                ProgressStore::default()
            }
        };

        let mut app = Self {
            audio_worker: Some(AudioWorker::start(settings.playback.volume)),
            playing_until: None,
            display_data: AppDisplayData {
                audio_worker_active: true,
                selection: Selection::new(settings.default_root),
                lesson: None,
                lesson_error: None,
                pressed_key: None,
                playing: false,
                keyboard_octaves: settings.keyboard_octaves,
                quiz: None,
                progress,
                today: today(),
            },
            settings,
        };
        app.refresh_lesson();
        info!("trainer created");
        app
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl TrainerApp {
    /// Rebuilds the lesson after a selector changed.
    fn refresh_lesson(&mut self) {
        self.display_data.pressed_key = None;
        match build_lesson(&self.display_data.selection) {
            Ok(lesson) => {
                debug!(title = %lesson.title, notes = ?lesson.notes, "lesson built");
                self.display_data.lesson = Some(lesson);
                self.display_data.lesson_error = None;
            }
            Err(e) => {
                error!("could not build lesson: {e}");
                self.display_data.lesson = None;
                self.display_data.lesson_error = Some(e.to_string());
            }
        }
    }

    fn play(&mut self, plan: PlaybackPlan) {
        if plan.is_empty() {
            return;
        }
        self.playing_until = Some(Instant::now() + Duration::from_millis(plan.total_ms() as u64));
        self.display_data.playing = true;
        if let Some(worker) = &self.audio_worker {
            worker.play(plan);
        }
    }

    fn stop(&mut self) {
        if let Some(worker) = &self.audio_worker {
            worker.stop();
        }
        self.playing_until = None;
        self.display_data.playing = false;
    }

    fn play_quiz_prompt(&mut self) {
        let plan = self
            .display_data
            .quiz
            .as_ref()
            .and_then(|quiz| quiz.session.current())
            .map(|question| question.prompt(&self.settings.playback));
        match plan {
            Some(Ok(plan)) => self.play(plan),
            Some(Err(e)) => error!("could not plan quiz prompt: {e}"),
            None => {}
        }
    }

    fn save_progress(&self) {
        match self.display_data.progress.save(&self.settings.progress_path) {
            Ok(()) => debug!("progress saved"),
            Err(e) => error!("error saving progress: {e}"),
        }
    }

    /// Handles application state updates based on incoming messages.
    fn update(&mut self, message: Message) -> Task<Message> {
        if !matches!(message, Message::Tick) {
            debug!("received message: {:?}", message);
        }
        self.display_data.today = today();

        match message {
            Message::ModeSelected(mode) => {
                self.display_data.selection.mode = mode;
                self.refresh_lesson();
            }
            Message::RootSelected(root) | Message::CircleKeySelected(root) => {
                self.display_data.selection.root = root;
                self.refresh_lesson();
            }
            Message::ScaleSelected(scale) => {
                self.display_data.selection.scale = scale;
                self.refresh_lesson();
            }
            Message::ChordSelected(chord) => {
                self.display_data.selection.chord = chord;
                self.refresh_lesson();
            }
            Message::CadenceSelected(cadence) => {
                self.display_data.selection.cadence = cadence;
                self.refresh_lesson();
            }
            Message::KeyPressed(midi) => {
                self.display_data.pressed_key = Some(midi);
                self.play(PlaybackPlan {
                    events: vec![NoteEvent {
                        midi,
                        start_ms: 0,
                        duration_ms: self.settings.playback.note_ms,
                    }],
                });
            }
            Message::Play => {
                let plan = self
                    .display_data
                    .lesson
                    .as_ref()
                    .map(|lesson| lesson.plan(&self.settings.playback));
                match plan {
                    Some(Ok(plan)) => self.play(plan),
                    Some(Err(e)) => error!("could not plan lesson playback: {e}"),
                    None => warn!("nothing to play"),
                }
            }
            Message::Stop => self.stop(),
            Message::MarkPracticed => {
                let today = self.display_data.today;
                let target = self.display_data.lesson.as_ref().and_then(|l| l.practice.clone());
                match target {
                    Some(PracticeTarget::Scale(id)) => {
                        self.display_data.progress.complete_scale(&id, today);
                        info!(id = %id, "scale marked as practiced");
                        self.save_progress();
                    }
                    Some(PracticeTarget::Chord(id)) => {
                        self.display_data.progress.complete_chord(&id, today);
                        info!(id = %id, "chord marked as practiced");
                        self.save_progress();
                    }
                    None => {}
                }
            }
            Message::PracticeKindSelected(kind) => {
                self.display_data.selection.practice = kind;
                self.refresh_lesson();
            }
            Message::NewChallenge => {
                let kind = self.display_data.selection.practice;
                let challenge = practice::generate_challenge(kind, &mut rand::thread_rng());
                self.display_data.selection.apply_challenge(challenge);
                self.stop();
                self.refresh_lesson();
            }
            Message::ShowAnswer => {
                let revealed = self.display_data.lesson.as_mut().is_some_and(Lesson::reveal);
                if revealed {
                    let challenge = self.display_data.selection.challenge();
                    let today = self.display_data.today;
                    challenge.record(&mut self.display_data.progress, today);
                    info!(id = %challenge.progress_id(), "practice answer revealed");
                    self.save_progress();
                }
            }
            Message::ResetChallenge => {
                self.stop();
                if let Some(lesson) = &mut self.display_data.lesson {
                    lesson.hidden = true;
                }
            }
            Message::StartQuiz(kind) => {
                info!(kind = kind.key(), "starting ear training quiz");
                self.display_data.quiz = Some(QuizState {
                    session: QuizSession::start(kind, &mut rand::thread_rng()),
                    verdict: None,
                });
                self.play_quiz_prompt();
            }
            Message::QuizReplay => self.play_quiz_prompt(),
            Message::QuizAnswer(option) => {
                if let Some(quiz) = &mut self.display_data.quiz {
                    if quiz.verdict.is_none() {
                        quiz.verdict = Some(quiz.session.answer(option));
                    }
                }
            }
            Message::QuizNext => {
                let mut finished = None;
                if let Some(quiz) = &mut self.display_data.quiz {
                    quiz.session.next();
                    quiz.verdict = None;
                    if quiz.session.is_complete() {
                        finished = Some((quiz.session.kind(), quiz.session.score(), quiz.session.total()));
                    }
                }
                match finished {
                    Some((kind, score, total)) => {
                        info!(kind = kind.key(), score, total, "quiz finished");
                        let today = self.display_data.today;
                        self.display_data
                            .progress
                            .update_ear_training_score(kind, score, total, today);
                        self.save_progress();
                    }
                    None => self.play_quiz_prompt(),
                }
            }
            Message::QuizClose => {
                self.display_data.quiz = None;
                self.stop();
            }
            Message::Tick => {
                if let Some(until) = self.playing_until {
                    if Instant::now() >= until {
                        self.playing_until = None;
                        self.display_data.playing = false;
                    }
                }
            }
            Message::Exit => {
                info!("window close requested, shutting down audio");
                if let Some(mut worker) = self.audio_worker.take() {
                    worker.shutdown();
                }
                self.display_data.audio_worker_active = false;
                return iced::exit();
            }
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        create_main_view(&self.display_data)
    }

    /// Close requests always; a timer only while a plan is playing.
    fn subscription(&self) -> Subscription<Message> {
        let close = iced::window::close_requests().map(|_| Message::Exit);
        if self.display_data.playing {
            Subscription::batch([close, iced::time::every(TICK_INTERVAL).map(|_| Message::Tick)])
        } else {
            close
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}
