//! # Main Display Module
//!
//! This module contains the main display components and layout logic
//! for the music theory trainer: lesson selectors and text, practice drills,
//! the piano keyboard, the circle of fifths, the ear training panel and the
//! progress panel.

use iced::widget::{button, column, container, horizontal_space, pick_list, row, text, Space};
use iced::{Alignment, Color, Element, Length};
use std::fmt;
use theory_core::practice::PracticeKind;
use theory_core::quiz::{self, QuizKind};
use theory_core::{CadenceType, ChordType, PitchClass, ScaleType};

use super::{circle_of_fifths, piano_keyboard};
use crate::lesson::{LessonMode, PracticeTarget};
use crate::{AppDisplayData, Message, QuizState};

const CORRECT: Color = Color::from_rgb(0.2, 0.65, 0.35);
const WRONG: Color = Color::from_rgb(0.8, 0.2, 0.2);
const ACTIVE: Color = Color::from_rgb(0.25, 0.45, 0.8);

/// A pick list entry: a value with the label shown for it.
#[derive(Debug, Clone, PartialEq)]
struct Choice<T> {
    value: T,
    label: &'static str,
}

impl<T> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

fn choices<T: Copy>(values: &[T], label: impl Fn(T) -> &'static str) -> Vec<Choice<T>> {
    values
        .iter()
        .map(|&value| Choice {
            value,
            label: label(value),
        })
        .collect()
}

fn selected<T: Copy + PartialEq>(options: &[Choice<T>], value: T) -> Option<Choice<T>> {
    options.iter().find(|c| c.value == value).cloned()
}

/// Creates the complete main application view
pub fn create_main_view(data: &AppDisplayData) -> Element<'static, Message> {
    if !data.audio_worker_active {
        return container(text("Shutting down...").size(40))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into();
    }

    let title = text("Music Theory Trainer").size(28);

    let left = column![
        create_mode_row(data.selection.mode),
        create_selector_row(data),
        create_lesson_panel(data),
        create_keyboard_panel(data),
    ]
    .spacing(15)
    .width(Length::Fill);

    let right = column![
        circle_of_fifths::CircleOfFifths::new(data.selection.root).view(),
        create_quiz_panel(data),
        create_progress_panel(data),
    ]
    .spacing(15)
    .width(Length::Fixed(320.0));

    let main_content = column![
        title,
        Space::with_height(10),
        row![left, Space::with_width(20), right].align_y(Alignment::Start),
    ]
    .padding(20);

    container(main_content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Button filled with `color`, used for the active mode and quiz verdicts.
fn colored_button(label: String, color: Option<Color>) -> button::Button<'static, Message> {
    let mut b = button(text(label).size(14)).padding([6, 10]);
    if let Some(color) = color {
        b = b.style(move |_theme, _status| button::Style {
            background: Some(iced::Background::Color(color)),
            text_color: Color::WHITE,
            ..button::Style::default()
        });
    }
    b
}

fn create_mode_row(current: LessonMode) -> Element<'static, Message> {
    let mut modes = row![].spacing(8);
    for mode in LessonMode::ALL {
        let color = (mode == current).then_some(ACTIVE);
        modes = modes.push(
            colored_button(mode.label().to_string(), color).on_press(Message::ModeSelected(mode)),
        );
    }
    modes.into()
}

fn create_selector_row(data: &AppDisplayData) -> Element<'static, Message> {
    let selection = data.selection;
    let roots = choices(&PitchClass::ALL, PitchClass::name);
    let root_label = match selection.mode {
        LessonMode::Cadence => "Key",
        _ => "Root",
    };
    let root_list = pick_list(roots.clone(), selected(&roots, selection.root), |c: Choice<PitchClass>| {
        Message::RootSelected(c.value)
    });

    let pattern_list: Element<'static, Message> = match selection.mode {
        LessonMode::Scale => {
            let options = choices(&ScaleType::ALL, |s| s.definition().name);
            let current = selected(&options, selection.scale);
            pick_list(options, current, |c: Choice<ScaleType>| Message::ScaleSelected(c.value)).into()
        }
        LessonMode::Chord => {
            let options = choices(&ChordType::ALL, |c| c.definition().name);
            let current = selected(&options, selection.chord);
            pick_list(options, current, |c: Choice<ChordType>| Message::ChordSelected(c.value)).into()
        }
        LessonMode::Cadence => {
            let options = choices(&CadenceType::ALL, |c| c.definition().name);
            let current = selected(&options, selection.cadence);
            pick_list(options, current, |c: Choice<CadenceType>| Message::CadenceSelected(c.value)).into()
        }
        LessonMode::Practice => return create_practice_selector_row(data, root_list.into()),
    };

    row![
        text(root_label).size(14),
        root_list,
        Space::with_width(20),
        text(selection.mode.label()).size(14),
        pattern_list,
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

/// Practice kind, root and pattern selectors plus a random challenge button.
fn create_practice_selector_row(
    data: &AppDisplayData,
    root_list: Element<'static, Message>,
) -> Element<'static, Message> {
    let selection = data.selection;
    let kinds = choices(&PracticeKind::ALL, PracticeKind::label);
    let kind_list = pick_list(kinds.clone(), selected(&kinds, selection.practice), |c: Choice<PracticeKind>| {
        Message::PracticeKindSelected(c.value)
    });

    let pattern_list: Element<'static, Message> = match selection.practice {
        PracticeKind::Scale => {
            let options = choices(&ScaleType::ALL, |s| s.definition().name);
            let current = selected(&options, selection.scale);
            pick_list(options, current, |c: Choice<ScaleType>| Message::ScaleSelected(c.value)).into()
        }
        PracticeKind::Chord => {
            let options = choices(&ChordType::ALL, |c| c.definition().name);
            let current = selected(&options, selection.chord);
            pick_list(options, current, |c: Choice<ChordType>| Message::ChordSelected(c.value)).into()
        }
    };

    row![
        kind_list,
        text("Root").size(14),
        root_list,
        pattern_list,
        colored_button("Random challenge".to_string(), None).on_press(Message::NewChallenge),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

fn create_lesson_panel(data: &AppDisplayData) -> Element<'static, Message> {
    let Some(lesson) = &data.lesson else {
        let message = data
            .lesson_error
            .clone()
            .unwrap_or_else(|| "No lesson selected".to_string());
        return container(text(message).size(16)).padding(15).into();
    };

    let notes = if lesson.hidden {
        "Notes: ?".to_string()
    } else {
        format!("Notes: {}", lesson.notes.join(" - "))
    };
    let mut content = column![
        text(lesson.title.clone()).size(22),
        text(lesson.description.clone()).size(14),
        text(notes).size(18),
    ]
    .spacing(6);

    if !lesson.chords.is_empty() {
        let chords: Vec<String> = lesson.chords.iter().map(|c| c.join(" ")).collect();
        content = content.push(text(format!("Chords: {}", chords.join("  |  "))).size(16));
    }
    for line in &lesson.details {
        content = content.push(text(line.clone()).size(13));
    }

    let mut actions = row![].spacing(8).align_y(Alignment::Center);
    if lesson.hidden {
        actions = actions.push(
            colored_button("Show answer".to_string(), Some(ACTIVE)).on_press(Message::ShowAnswer),
        );
        content = content.push(Space::with_height(5)).push(actions);
        return container(content).padding(15).width(Length::Fill).into();
    }

    actions = if data.playing {
        actions.push(colored_button("Stop".to_string(), None).on_press(Message::Stop))
    } else {
        actions.push(colored_button("Play".to_string(), None).on_press(Message::Play))
    };
    if let Some(target) = &lesson.practice {
        actions = if data.selection.mode == LessonMode::Practice {
            actions.push(colored_button("Reset".to_string(), None).on_press(Message::ResetChallenge))
        } else {
            actions.push(
                colored_button("Mark as practiced".to_string(), None)
                    .on_press(Message::MarkPracticed),
            )
        };
        let record = match target {
            PracticeTarget::Scale(id) => data.progress.scales.get(id),
            PracticeTarget::Chord(id) => data.progress.chords.get(id),
        };
        if let Some(record) = record {
            actions = actions.push(
                text(format!(
                    "Practiced {} time(s), last on {}",
                    record.times_completed, record.last_practiced
                ))
                .size(13),
            );
        }
    }
    content = content.push(Space::with_height(5)).push(actions);

    container(content).padding(15).width(Length::Fill).into()
}

/// Creates the piano keyboard panel
fn create_keyboard_panel(data: &AppDisplayData) -> Element<'static, Message> {
    let highlighted = data
        .lesson
        .as_ref()
        .map(|lesson| lesson.highlighted())
        .unwrap_or_default();
    let keyboard =
        piano_keyboard::PianoKeyboard::new(data.keyboard_octaves, highlighted, data.pressed_key);

    container(
        column![
            text("Keyboard").size(18),
            Space::with_height(10),
            keyboard.view()
        ]
        .spacing(5)
        .padding(15),
    )
    .width(Length::Fill)
    .into()
}

fn create_quiz_panel(data: &AppDisplayData) -> Element<'static, Message> {
    let content = match &data.quiz {
        None => create_quiz_menu(data),
        Some(quiz) if quiz.session.is_complete() => create_quiz_results(quiz),
        Some(quiz) => create_quiz_question(quiz),
    };
    container(column![text("Ear Training").size(18), content].spacing(10).padding(15))
        .width(Length::Fill)
        .into()
}

fn create_quiz_menu(data: &AppDisplayData) -> Element<'static, Message> {
    let mut menu = column![].spacing(6);
    for kind in QuizKind::ALL {
        let score = data.progress.ear_training.get(kind);
        let best = if score.attempted() {
            format!("{}/{}", score.score, score.total_questions)
        } else {
            "--".to_string()
        };
        menu = menu.push(
            row![
                colored_button(kind.title().to_string(), None).on_press(Message::StartQuiz(kind)),
                horizontal_space(),
                text(best).size(14),
            ]
            .align_y(Alignment::Center),
        );
    }
    menu.into()
}

fn create_quiz_question(quiz: &QuizState) -> Element<'static, Message> {
    let session = &quiz.session;
    let Some(question) = session.current() else {
        return text("No question").into();
    };
    let kind = session.kind();

    let mut content = column![
        text(kind.title()).size(16),
        text(format!("Question {} of {}", session.position() + 1, session.total())).size(13),
        text(kind.question_text()).size(15),
        colored_button("Replay".to_string(), None).on_press(Message::QuizReplay),
    ]
    .spacing(6);

    for &option in &question.options {
        let color = match session.selected() {
            Some(_) if question.is_correct(option) => Some(CORRECT),
            Some(picked) if picked == option => Some(WRONG),
            _ => None,
        };
        let mut option_button = colored_button(kind.display_name(option), color).width(Length::Fill);
        if quiz.verdict.is_none() {
            option_button = option_button.on_press(Message::QuizAnswer(option));
        }
        content = content.push(option_button);
    }

    if let Some(correct) = quiz.verdict {
        let verdict = if correct {
            "Correct!".to_string()
        } else {
            format!("Incorrect. The answer was {}.", kind.display_name(question.correct))
        };
        content = content.push(text(verdict).size(14));

        if kind == QuizKind::Progressions {
            if let Ok(chords) = quiz::progression_in_key(question.correct, question.root) {
                let chords: Vec<String> = chords.iter().map(|c| c.join(" ")).collect();
                content = content.push(
                    text(format!("In {}: {}", question.root, chords.join(" | "))).size(13),
                );
            }
        }

        let next_label = if session.position() + 1 == session.total() as usize {
            "Finish"
        } else {
            "Next"
        };
        content = content.push(colored_button(next_label.to_string(), None).on_press(Message::QuizNext));
    }

    content
        .push(colored_button("Quit".to_string(), None).on_press(Message::QuizClose))
        .into()
}

fn create_quiz_results(quiz: &QuizState) -> Element<'static, Message> {
    let session = &quiz.session;
    column![
        text(format!("{} complete", session.kind().title())).size(16),
        text(format!(
            "Score: {} / {} ({}%)",
            session.score(),
            session.total(),
            session.percentage()
        ))
        .size(18),
        text(session.feedback()).size(14),
        row![
            colored_button("Try again".to_string(), None)
                .on_press(Message::StartQuiz(session.kind())),
            colored_button("Close".to_string(), None).on_press(Message::QuizClose),
        ]
        .spacing(8),
    ]
    .spacing(6)
    .into()
}

fn create_progress_panel(data: &AppDisplayData) -> Element<'static, Message> {
    let progress = &data.progress;
    let mut content = column![
        text("Progress").size(18),
        text(format!("Completion: {}%", progress.completion_percentage())).size(14),
        text(format!("Streak: {} day(s)", progress.streak_days(data.today))).size(14),
        text(format!("Practice days: {}", progress.total_practice_time)).size(14),
        text(format!("Ear training average: {:.0}%", progress.ear_training_average())).size(14),
    ]
    .spacing(4);

    for kind in QuizKind::ALL {
        let score = progress.ear_training.get(kind);
        if score.attempted() {
            content = content.push(
                text(format!("{}: {:.0}%", kind.title(), score.percentage())).size(13),
            );
        }
    }

    container(content.padding(15)).width(Length::Fill).into()
}
