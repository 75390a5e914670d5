//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The game redraws once per input, so frames are compared a whole row at a
//! time and a changed row is rewritten from column 0. Inside a row, adjacent
//! cells with the same style go out as one printed span. Continuation cells
//! add nothing to a span: the wide cluster before them already covers that
//! column.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor, event,
    style::{Attribute, Color, Colors, Print, ResetColor, SetAttribute, SetColors},
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Run of same-styled cells ready to print
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSpan {
    pub style: CellStyle,
    pub text: String,
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen and mouse reporting for swipes.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(event::EnableMouseCapture)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(event::DisableMouseCapture)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget the last frame so the next one clears the screen (resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Bring the terminal up to date with `fb`.
    ///
    /// The renderer keeps `fb` as its reference frame and hands the previous
    /// one back in its place, so the caller can render into it again.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame_into(self.last.as_ref(), fb, &mut self.buf)?;
        self.flush_buf()?;

        let mut kept = self.last.take().unwrap_or_else(|| FrameBuffer::new(0, 0));
        std::mem::swap(&mut kept, fb);
        self.last = Some(kept);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Rows of `next` that differ from `prev`; every row when there is no
/// previous frame of the same size.
pub fn dirty_rows(prev: Option<&FrameBuffer>, next: &FrameBuffer) -> Vec<u16> {
    match prev {
        Some(prev) if same_size(prev, next) => (0..next.height())
            .filter(|&y| prev.row(y) != next.row(y))
            .collect(),
        _ => (0..next.height()).collect(),
    }
}

/// Split a row into printable spans.
pub fn style_spans(row: &[Cell]) -> Vec<StyleSpan> {
    let mut spans: Vec<StyleSpan> = Vec::new();
    for cell in row.iter().filter(|c| !c.is_continuation()) {
        match spans.last_mut() {
            Some(span) if span.style == cell.style => span.text.push_str(&cell.symbol),
            _ => spans.push(StyleSpan {
                style: cell.style,
                text: cell.symbol.to_string(),
            }),
        }
    }
    spans
}

/// Encode the commands taking the screen from `prev` to `next` into `out`.
///
/// Returns how many rows were rewritten. Nothing is encoded when the frames
/// are equal.
pub fn encode_frame_into(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<usize> {
    if !prev.is_some_and(|p| same_size(p, next)) {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let rows = dirty_rows(prev, next);
    for &y in &rows {
        out.queue(cursor::MoveTo(0, y))?;
        for span in style_spans(next.row(y)) {
            queue_style(out, span.style)?;
            out.queue(Print(span.text))?;
        }
    }

    if !rows.is_empty() {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(rows.len())
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

fn queue_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    // Attribute reset also drops colors, so it goes first.
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetColors(Colors::new(color(style.fg), color(style.bg))))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOOL_MAN: &str = "\u{1F468}\u{200D}\u{1F527}";

    fn encode(prev: Option<&FrameBuffer>, next: &FrameBuffer) -> (usize, String) {
        let mut out = Vec::new();
        let rows = encode_frame_into(prev, next, &mut out).unwrap();
        (rows, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_spans_join_same_style_and_skip_continuations() {
        let plain = CellStyle::default();
        let bold = CellStyle { bold: true, ..plain };
        let mut fb = FrameBuffer::new(6, 1);
        fb.put_str(0, 0, "ab", plain);
        fb.put_wide(2, 0, TOOL_MAN, plain);
        fb.put_char(4, 0, 'c', bold);
        fb.put_char(5, 0, 'd', bold);

        let spans = style_spans(fb.row(0));
        assert_eq!(
            spans,
            vec![
                StyleSpan {
                    style: plain,
                    text: format!("ab{}", TOOL_MAN),
                },
                StyleSpan {
                    style: bold,
                    text: "cd".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_first_frame_clears_and_prints_cluster_once() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.put_wide(1, 1, TOOL_MAN, CellStyle::default());

        let (rows, text) = encode(None, &fb);
        assert_eq!(rows, 2);
        assert!(text.contains("\x1b[2J"));
        assert_eq!(text.matches(TOOL_MAN).count(), 1);
    }

    #[test]
    fn test_unchanged_frame_encodes_nothing() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.put_str(0, 0, "2048", CellStyle::default());
        let prev = fb.clone();

        assert_eq!(dirty_rows(Some(&prev), &fb), Vec::<u16>::new());
        let (rows, text) = encode(Some(&prev), &fb);
        assert_eq!(rows, 0);
        assert!(text.is_empty());
    }

    #[test]
    fn test_changed_row_is_rewritten_from_column_zero() {
        let style = CellStyle::default();
        let prev = FrameBuffer::new(6, 3);
        let mut next = prev.clone();
        // Only the continuation half changes; the whole row still goes out.
        next.set(3, 1, Cell::continuation(CellStyle { bold: true, ..style }));

        assert_eq!(dirty_rows(Some(&prev), &next), vec![1]);
        let (rows, text) = encode(Some(&prev), &next);
        assert_eq!(rows, 1);
        assert!(text.contains("\x1b[2;1H"));
        assert!(!text.contains("\x1b[2J"));
    }

    #[test]
    fn test_size_change_redraws_everything() {
        let prev = FrameBuffer::new(4, 2);
        let next = FrameBuffer::new(5, 3);
        assert_eq!(dirty_rows(Some(&prev), &next), vec![0, 1, 2]);
        let (_, text) = encode(Some(&prev), &next);
        assert!(text.contains("\x1b[2J"));
    }
}
