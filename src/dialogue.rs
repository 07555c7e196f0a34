//! A sequence of messages shown in one textbox.

use std::collections::VecDeque;

use serde::Serialize;

use crate::error::Result;
use crate::font::FontMetricsTable;
use crate::host::StepInput;
use crate::render::RenderContext;
use crate::typewriter::{process_text_box, Message, TextBox};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DialogueStatus {
    /// The current message is still on screen.
    Typing,
    /// The player acknowledged a message; the next one starts next step.
    MessageFinished { remaining: usize },
    /// No messages left.
    Finished,
}

/// Queue of messages sharing one textbox. The box is reset between messages.
#[derive(Debug, Clone)]
pub struct Dialogue {
    textbox: TextBox,
    queue: VecDeque<Message>,
    completed: usize,
}

impl Dialogue {
    pub fn new(textbox: TextBox, messages: impl IntoIterator<Item = Message>) -> Self {
        let mut textbox = textbox;
        textbox.reset();
        Self { textbox, queue: messages.into_iter().collect(), completed: 0 }
    }

    pub fn textbox(&self) -> &TextBox {
        &self.textbox
    }

    /// The message currently being shown.
    pub fn current(&self) -> Option<&Message> {
        self.queue.front()
    }

    /// Messages not yet acknowledged, including the current one.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queue another message after the existing ones.
    pub fn push(&mut self, message: Message) {
        self.queue.push_back(message);
    }

    /// Drop every queued message and clear the box.
    pub fn abort(&mut self) {
        self.queue.clear();
        self.textbox.reset();
    }

    /// Run one frame of the current message.
    pub fn step(
        &mut self,
        font: &FontMetricsTable,
        ctx: &mut RenderContext<'_>,
        input: StepInput,
    ) -> Result<DialogueStatus> {
        let Some(message) = self.queue.front_mut() else {
            return Ok(DialogueStatus::Finished);
        };
        if !process_text_box(font, &mut self.textbox, message, ctx, input)? {
            return Ok(DialogueStatus::Typing);
        }

        self.queue.pop_front();
        self.textbox.reset();
        self.completed += 1;
        tracing::debug!("Message {} done, {} left", self.completed, self.queue.len());

        Ok(if self.queue.is_empty() {
            DialogueStatus::Finished
        } else {
            DialogueStatus::MessageFinished { remaining: self.queue.len() }
        })
    }
}
