//! Terminal rendering of session frames.

use colored::Colorize;
use devcon_application::{PresentationAdapter, RenderFrame, RenderedTurn, SessionView, Speaker, TurnBody};
use devcon_core::notification::{
    LogNotificationSink, Notification, NotificationLevel, NotificationSink,
};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Prints each turn once, in order, and the typing indicator while pending.
#[derive(Default)]
pub struct TerminalRenderer {
    adapter: PresentationAdapter,
    printed: Vec<String>,
    indicator_shown: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, view: &SessionView) {
        let frame = self.adapter.frame(view);
        if frame.scroll_to.is_none() {
            return;
        }

        let keys: Vec<&str> = frame.turns.iter().map(|t| t.key.as_str()).collect();
        let continues = self.printed.len() <= keys.len()
            && self.printed.iter().zip(&keys).all(|(a, b)| a == b);
        if !continues {
            println!("{}", "─── conversation cleared ───".bright_black());
            self.printed.clear();
        }

        for turn in &frame.turns[self.printed.len()..] {
            print_turn(turn);
            self.printed.push(turn.key.clone());
        }

        self.render_indicator(&frame);
    }

    fn render_indicator(&mut self, frame: &RenderFrame) {
        if frame.composing && !self.indicator_shown {
            println!("{}", "DEVCON AI is typing...".bright_black().italic());
        }
        self.indicator_shown = frame.composing;
    }
}

fn print_turn(turn: &RenderedTurn) {
    let header = format!("{} · {}", turn.speaker.label(), turn.time_label);
    match turn.speaker {
        Speaker::You => println!("{}", header.green().bold()),
        Speaker::DevconAi => println!("{}", header.bright_magenta().bold()),
    }
    match &turn.body {
        TurnBody::Plain(text) => {
            for line in text.lines() {
                println!("{}", line.green());
            }
        }
        TurnBody::Markdown(text) => {
            for line in render_markdown(text) {
                println!("{}", line);
            }
        }
    }
    println!();
}

/// Renders assistant markdown as styled terminal lines.
///
/// Headings, emphasis, inline code and list items are styled; links keep
/// their target in parentheses. Paragraphs are separated by a blank line.
pub fn render_markdown(text: &str) -> Vec<String> {
    let mut writer = MarkdownLines::default();
    for event in Parser::new_ext(text, Options::empty()) {
        writer.handle(event);
    }
    writer.finish()
}

#[derive(Default)]
struct MarkdownLines {
    lines: Vec<String>,
    current: String,
    strong: usize,
    emphasis: usize,
    heading: bool,
    code_block: bool,
    /// Next number for ordered lists, `None` for bullets.
    lists: Vec<Option<u64>>,
    link: Option<String>,
}

impl MarkdownLines {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => {
                let styled = code.yellow().to_string();
                self.current.push_str(&styled);
            }
            Event::SoftBreak | Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.lines.push("───".bright_black().to_string());
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { .. } => {
                self.flush();
                self.heading = true;
            }
            Tag::CodeBlock(_) => {
                self.flush();
                self.code_block = true;
            }
            Tag::List(first) => {
                self.flush();
                self.lists.push(first);
            }
            Tag::Item => {
                self.flush();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(number)) => {
                        let marker = format!("{}.", number);
                        *number += 1;
                        marker
                    }
                    _ => "•".to_string(),
                };
                self.current.push_str(&format!("{}{} ", indent, marker));
            }
            Tag::Strong => self.strong += 1,
            Tag::Emphasis => self.emphasis += 1,
            Tag::Link { dest_url, .. } => self.link = Some(dest_url.to_string()),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.heading = false;
                self.flush();
            }
            TagEnd::CodeBlock => {
                self.code_block = false;
                self.flush();
                self.lines.push(String::new());
            }
            TagEnd::Paragraph => {
                self.flush();
                if self.lists.is_empty() {
                    self.lines.push(String::new());
                }
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.lines.push(String::new());
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::Strong => self.strong = self.strong.saturating_sub(1),
            TagEnd::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            TagEnd::Link => {
                if let Some(url) = self.link.take() {
                    let target = format!(" ({})", url).bright_black().to_string();
                    self.current.push_str(&target);
                }
            }
            _ => {}
        }
    }

    /// Code blocks arrive as one text event with embedded newlines.
    fn push_text(&mut self, text: &str) {
        let mut segments = text.split('\n').peekable();
        while let Some(segment) = segments.next() {
            if !segment.is_empty() {
                let styled = self.style(segment);
                self.current.push_str(&styled);
            }
            if segments.peek().is_some() {
                self.lines.push(std::mem::take(&mut self.current));
            }
        }
    }

    fn style(&self, text: &str) -> String {
        let mut styled = if self.code_block {
            text.yellow()
        } else if self.heading {
            text.bright_blue().bold().underline()
        } else {
            text.bright_blue()
        };
        if self.strong > 0 {
            styled = styled.bold();
        }
        if self.emphasis > 0 {
            styled = styled.italic();
        }
        styled.to_string()
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(std::mem::take(&mut self.current));
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        while self.lines.last().is_some_and(|line| line.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Shows notifications as a single coloured line, and logs them.
pub struct TerminalNotifier;

impl NotificationSink for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        LogNotificationSink.notify(notification.clone());
        let line = format!("[{}] {}", notification.title, notification.description);
        match notification.level {
            NotificationLevel::Error => println!("{}", line.red()),
            NotificationLevel::Success => println!("{}", line.bright_green()),
            NotificationLevel::Info => println!("{}", line.yellow()),
        }
    }
}
