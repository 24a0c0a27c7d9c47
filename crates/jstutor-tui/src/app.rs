use jstutor_core::{ChatController, QUICK_ACTIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub controller: ChatController,

    // Input state
    pub input: String,
    pub cursor: usize, // cursor position in input, in chars

    // Chat viewport state
    pub chat_scroll: u16,
    pub chat_height: u16, // inner height, updated during render
    pub chat_width: u16,  // inner width, updated during render

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation
}

impl App {
    pub fn new(controller: ChatController) -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Editing,
            controller,
            input: String::new(),
            cursor: 0,
            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            animation_frame: 0,
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.controller.is_pending() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// Checks the in-flight request; pins the scroll when a reply landed.
    pub async fn poll_generation(&mut self) {
        if self.controller.poll().await {
            self.scroll_to_bottom();
        }
    }

    /// Submits whatever is in the input box. The box is only cleared when
    /// the controller accepted the prompt (it drops submissions while a
    /// request is pending).
    pub fn submit_input(&mut self) {
        if self.controller.is_pending() || self.input.trim().is_empty() {
            return;
        }

        let prompt = std::mem::take(&mut self.input);
        self.cursor = 0;
        self.controller.submit(&prompt);
        self.scroll_to_bottom();
    }

    /// Fires the canned prompt bound to the given quick-action slot.
    pub fn quick_action(&mut self, index: usize) {
        if let Some(action) = QUICK_ACTIONS.get(index) {
            self.controller.quick_action(action.prompt);
            self.scroll_to_bottom();
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let max = self.transcript_line_count().saturating_sub(self.chat_height.max(1));
        self.chat_scroll = (self.chat_scroll + lines).min(max);
    }

    /// Scroll the chat so the newest message (or the thinking indicator)
    /// is visible.
    pub fn scroll_to_bottom(&mut self) {
        let total = self.transcript_line_count();
        let visible = if self.chat_height > 0 { self.chat_height } else { 20 };
        self.chat_scroll = total.saturating_sub(visible);
    }

    // Approximates the rendered transcript height; the paragraph wraps on
    // word boundaries, so this only needs to be close enough for scrolling.
    fn transcript_line_count(&self) -> u16 {
        let wrap_width = if self.chat_width > 0 { self.chat_width as usize } else { 50 };

        let mut total: u16 = 0;
        for msg in self.controller.messages() {
            total += 1; // label line ("You:", "Tutor:", ...)
            total += wrapped_line_count(&msg.content, wrap_width);
            if let Some(code) = &msg.code {
                total += 1; // blank line before the code block
                total += wrapped_line_count(code, wrap_width);
            }
            if let Some(explanation) = &msg.explanation {
                total += wrapped_line_count(explanation, wrap_width);
            }
            total += 1; // blank line after message
        }

        if self.controller.is_pending() {
            total += 2; // "Tutor:" + "Thinking..."
        }

        total
    }
}

/// Number of terminal rows a block of text occupies when hard-wrapped at
/// the given width. Counts chars, not bytes, so UTF-8 text is sized right.
pub fn wrapped_line_count(text: &str, width: usize) -> u16 {
    let width = width.max(1);
    let mut total: u16 = 0;
    for line in text.lines() {
        let chars = line.chars().count();
        if chars == 0 {
            total += 1;
        } else {
            total += chars.div_ceil(width) as u16;
        }
    }
    // Empty text still occupies a row.
    if text.is_empty() {
        total += 1;
    }
    total
}
