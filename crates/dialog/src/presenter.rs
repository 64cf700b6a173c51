use crate::builder::Dialog;
use std::io::Write;

/// Something that can show a modal dialog to the player.
pub trait DialogPresenter {
    fn present(&mut self, dialog: Dialog);
}

impl<P: DialogPresenter + ?Sized> DialogPresenter for &mut P {
    fn present(&mut self, dialog: Dialog) {
        (**self).present(dialog);
    }
}

/// Renders dialogs as framed text on a writer.
pub struct ConsolePresenter<W: Write> {
    out: W,
}

impl ConsolePresenter<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DialogPresenter for ConsolePresenter<W> {
    fn present(&mut self, dialog: Dialog) {
        let body = dialog.to_string();
        let width = body.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let rule = "-".repeat(width + 2);
        let result = writeln!(self.out, "+{rule}+")
            .and_then(|()| {
                body.lines().try_for_each(|line| {
                    let pad = width - line.chars().count();
                    writeln!(self.out, "| {line}{} |", " ".repeat(pad))
                })
            })
            .and_then(|()| writeln!(self.out, "+{rule}+"))
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            tracing::warn!("failed to display dialog '{}': {e}", dialog.title);
        }
    }
}

/// Keeps every dialog it is given, in order.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    dialogs: Vec<Dialog>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialogs(&self) -> &[Dialog] {
        &self.dialogs
    }

    pub fn last(&self) -> Option<&Dialog> {
        self.dialogs.last()
    }

    pub fn is_empty(&self) -> bool {
        self.dialogs.is_empty()
    }
}

impl DialogPresenter for RecordingPresenter {
    fn present(&mut self, dialog: Dialog) {
        self.dialogs.push(dialog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DialogBuilder;

    fn dialog() -> Dialog {
        DialogBuilder::new()
            .title_text("Error")
            .message_add_text_bold("Error: Failed to load game.")
            .message_add_text("Could not load missing.sav.")
            .build()
    }

    #[test]
    fn recording_presenter_keeps_order() {
        let mut rec = RecordingPresenter::new();
        assert!(rec.is_empty());
        rec.present(dialog());
        rec.present(DialogBuilder::new().title_text("Second").build());
        assert_eq!(rec.dialogs().len(), 2);
        assert_eq!(rec.last().unwrap().title, "Second");
    }

    #[test]
    fn presenter_works_through_mut_ref() {
        fn show(mut presenter: impl DialogPresenter) {
            presenter.present(dialog());
        }
        let mut rec = RecordingPresenter::new();
        show(&mut rec);
        assert_eq!(rec.dialogs().len(), 1);
    }

    #[test]
    fn console_presenter_frames_dialog() {
        let mut console = ConsolePresenter::new(Vec::new());
        console.present(dialog());
        let text = String::from_utf8(console.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.first().unwrap().starts_with("+-"));
        assert!(lines.last().unwrap().starts_with("+-"));
        assert!(text.contains("Could not load missing.sav."));
        assert!(text.contains("<OK>"));
        // Every framed row has the same width.
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }
}
