use std::fmt;

/// Acknowledgement controls shown under a dialog message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSet {
    #[default]
    Ok,
    OkCancel,
    YesNo,
}

impl ButtonSet {
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            Self::Ok => &["OK"],
            Self::OkCancel => &["OK", "Cancel"],
            Self::YesNo => &["Yes", "No"],
        }
    }
}

/// One paragraph of a dialog message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagePart {
    Bold(String),
    Text(String),
}

impl MessagePart {
    pub fn text(&self) -> &str {
        match self {
            Self::Bold(s) | Self::Text(s) => s,
        }
    }
}

/// A fully described modal dialog, ready to hand to a presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub message: Vec<MessagePart>,
    /// Image resource shown beside the message.
    pub image: Option<String>,
    pub buttons: ButtonSet,
}

impl Dialog {
    /// First bold paragraph, if any.
    pub fn headline(&self) -> Option<&str> {
        self.message.iter().find_map(|part| match part {
            MessagePart::Bold(s) => Some(s.as_str()),
            MessagePart::Text(_) => None,
        })
    }

    /// Whether any paragraph contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.message.iter().any(|part| part.text().contains(needle))
    }
}

impl fmt::Display for Dialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.title)?;
        for part in &self.message {
            match part {
                MessagePart::Bold(s) => writeln!(f, "  ** {s} **")?,
                MessagePart::Text(s) => writeln!(f, "  {s}")?,
            }
        }
        let buttons: Vec<String> = self
            .buttons
            .labels()
            .iter()
            .map(|label| format!("<{label}>"))
            .collect();
        write!(f, "  {}", buttons.join(" "))
    }
}

/// Fluent builder for [`Dialog`].
#[derive(Debug, Clone, Default)]
pub struct DialogBuilder {
    title: String,
    message: Vec<MessagePart>,
    image: Option<String>,
    buttons: ButtonSet,
}

impl DialogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title_text(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn message_add_text_bold(mut self, text: impl Into<String>) -> Self {
        self.message.push(MessagePart::Bold(text.into()));
        self
    }

    pub fn message_add_text(mut self, text: impl Into<String>) -> Self {
        self.message.push(MessagePart::Text(text.into()));
        self
    }

    pub fn image_file(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn button_set(mut self, buttons: ButtonSet) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn build(self) -> Dialog {
        Dialog {
            title: self.title,
            message: self.message,
            image: self.image,
            buttons: self.buttons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dialog {
        DialogBuilder::new()
            .title_text("Error")
            .message_add_text_bold("Something broke.")
            .message_add_text("Details follow.")
            .image_file("images/gui/dialogs/error.png")
            .button_set(ButtonSet::Ok)
            .build()
    }

    #[test]
    fn builder_keeps_message_order() {
        let dialog = sample();
        assert_eq!(dialog.title, "Error");
        assert_eq!(
            dialog.message,
            vec![
                MessagePart::Bold("Something broke.".into()),
                MessagePart::Text("Details follow.".into()),
            ]
        );
        assert_eq!(dialog.image.as_deref(), Some("images/gui/dialogs/error.png"));
    }

    #[test]
    fn headline_is_first_bold_part() {
        assert_eq!(sample().headline(), Some("Something broke."));
        let plain = DialogBuilder::new().message_add_text("hi").build();
        assert_eq!(plain.headline(), None);
    }

    #[test]
    fn mentions_searches_all_parts() {
        let dialog = sample();
        assert!(dialog.mentions("broke"));
        assert!(dialog.mentions("Details"));
        assert!(!dialog.mentions("Error"));
    }

    #[test]
    fn button_labels() {
        assert_eq!(ButtonSet::Ok.labels(), &["OK"]);
        assert_eq!(ButtonSet::YesNo.labels(), &["Yes", "No"]);
        assert_eq!(ButtonSet::default(), ButtonSet::Ok);
    }

    #[test]
    fn display_renders_every_part() {
        let text = sample().to_string();
        assert!(text.starts_with("[Error]"));
        assert!(text.contains("** Something broke. **"));
        assert!(text.contains("Details follow."));
        assert!(text.ends_with("<OK>"));
    }
}
