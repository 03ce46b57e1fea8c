//! Output adapters shared by the commands

use colored::{ColoredString, Colorize};
use derive_new::new;
use minus::Pager;
use std::io::{self, Write};

/// Wrapper that implements `Write` for the minus pager
///
/// The minus pager doesn't implement `std::io::Write` directly, so this wrapper
/// adapts it to be compatible with Rust's standard I/O traits. This allows
/// using the pager as a drop-in replacement for stdout in commands that produce
/// long output.
///
/// ## Usage
///
/// ```ignore
/// let pager = Pager::new();
/// let mut writer = PagerWriter::new(pager.clone());
/// writeln!(writer, "Some long output...")?;
/// page_all(pager)?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl PagerWriter {
    pub fn pager(&self) -> &Pager {
        &self.pager
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Colors patch text line by line before passing it on
///
/// File headers are bold, hunk ranges cyan, removed lines red and added
/// lines green. Incomplete lines are held back until their newline arrives
/// or the writer is flushed.
pub struct ColorWriter<W: Write> {
    inner: W,
    pending: Vec<u8>,
    in_header: bool,
}

impl<W: Write> ColorWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            pending: Vec::new(),
            in_header: false,
        }
    }

    fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        let (body, newline) = match line.strip_suffix(b"\n") {
            Some(body) => (body, &b"\n"[..]),
            None => (line, &b""[..]),
        };

        if body.starts_with(b"diff --git ") {
            self.in_header = true;
        } else if body.starts_with(b"@@ ") {
            self.in_header = false;
        }

        if self.in_header {
            self.write_painted(body, |text| text.bold())?;
        } else if let Some(end) = hunk_range_end(body) {
            // the range is cyan, any trailing section text stays plain
            let (range, tail) = body.split_at(end);
            self.write_painted(range, |text| text.cyan())?;
            self.inner.write_all(tail)?;
        } else if body.starts_with(b"+") {
            self.write_painted(body, |text| text.green())?;
        } else if body.starts_with(b"-") {
            self.write_painted(body, |text| text.red())?;
        } else {
            self.inner.write_all(body)?;
        }

        self.inner.write_all(newline)
    }

    /// Write `body` unchanged between the escape codes of `paint`
    fn write_painted(
        &mut self,
        body: &[u8],
        paint: impl Fn(&str) -> ColoredString,
    ) -> io::Result<()> {
        let painted = paint("\0").to_string();
        let (open, close) = painted.split_once('\0').unwrap_or(("", ""));

        self.inner.write_all(open.as_bytes())?;
        self.inner.write_all(body)?;
        self.inner.write_all(close.as_bytes())
    }
}

/// End of the `@@ -a +b @@` range at the start of a hunk header line
fn hunk_range_end(line: &[u8]) -> Option<usize> {
    let rest = line.strip_prefix(b"@@ ")?;
    rest.windows(3)
        .position(|window| window == b" @@")
        .map(|end| end + 6)
}

impl<W: Write> Write for ColorWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);

        while let Some(end) = self.pending.iter().position(|&byte| byte == b'\n') {
            let line = self.pending.drain(..=end).collect::<Vec<_>>();
            self.write_line(&line)?;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let line = std::mem::take(&mut self.pending);
            self.write_line(&line)?;
        }
        self.inner.flush()
    }
}
