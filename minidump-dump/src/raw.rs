// Copyright 2015 Ted Mielczarek. See the COPYRIGHT
// file at the top-level directory of this distribution.

//! Rendering of streams that are just a copy of some text file.
//!
//! Linux minidumps carry things like `/proc/self/cmdline` and
//! `/proc/self/environ` verbatim. Those are sequences of NUL-terminated
//! strings, so the terminators are printed as a visible `\0` followed by a
//! line break. Everything else is passed through byte for byte.

use std::io::{self, Write};

/// The marker written in place of each NUL byte.
pub const NUL_MARKER: &[u8] = b"\\0\n";

/// A piece of a raw stream, up to (not including) the next NUL byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span<'a> {
    pub bytes: &'a [u8],
    /// Whether a NUL byte ended this span.
    pub terminated: bool,
}

/// Splits a raw stream at its NUL bytes.
///
/// A stream ending with a NUL does not yield a trailing empty span, and a
/// stream without any NUL yields exactly one unterminated span.
#[derive(Clone, Debug)]
pub struct NulSpans<'a> {
    bytes: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> NulSpans<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        NulSpans {
            bytes,
            offset: 0,
            done: false,
        }
    }

    /// How many bytes have been consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<'a> Iterator for NulSpans<'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Span<'a>> {
        if self.done || self.offset >= self.bytes.len() {
            return None;
        }
        let rest = &self.bytes[self.offset..];
        match rest.iter().position(|&b| b == 0) {
            Some(nul) => {
                self.offset += nul + 1;
                Some(Span {
                    bytes: &rest[..nul],
                    terminated: true,
                })
            }
            None => {
                self.offset = self.bytes.len();
                self.done = true;
                Some(Span {
                    bytes: rest,
                    terminated: false,
                })
            }
        }
    }
}

/// Write `contents` to `out` with every NUL byte made visible, followed by a
/// blank line separating it from whatever comes next.
///
/// An empty stream is just the blank line.
pub fn render_raw_stream<W: Write>(contents: &[u8], out: &mut W) -> io::Result<()> {
    if contents.is_empty() {
        return writeln!(out);
    }
    for span in NulSpans::new(contents) {
        out.write_all(span.bytes)?;
        if span.terminated {
            out.write_all(NUL_MARKER)?;
        }
    }
    out.write_all(b"\n\n")
}

/// Write the header that introduces a raw stream.
pub fn write_stream_header<W: Write>(name: &str, out: &mut W) -> io::Result<()> {
    writeln!(out, "Stream {}:", name)
}

#[cfg(test)]
mod test {
    use super::*;

    fn render(contents: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        render_raw_stream(contents, &mut out).unwrap();
        out
    }

    #[test]
    fn test_empty_stream() {
        assert_eq!(render(b""), b"\n");
        assert_eq!(NulSpans::new(b"").count(), 0);
    }

    #[test]
    fn test_no_terminator() {
        assert_eq!(render(b"DISTRIB_ID=Ubuntu"), b"DISTRIB_ID=Ubuntu\n\n");
        let spans = NulSpans::new(b"abc").collect::<Vec<_>>();
        assert_eq!(
            spans,
            vec![Span {
                bytes: b"abc",
                terminated: false
            }]
        );
    }

    #[test]
    fn test_single_terminator() {
        let contents = b"/usr/bin/firefox\0--safe-mode";
        for (i, &b) in contents.iter().enumerate() {
            if b != 0 {
                continue;
            }
            let mut expected = contents[..i].to_vec();
            expected.extend_from_slice(NUL_MARKER);
            expected.extend_from_slice(&contents[i + 1..]);
            expected.extend_from_slice(b"\n\n");
            assert_eq!(render(contents), expected);
        }
    }

    #[test]
    fn test_trailing_terminator() {
        assert_eq!(render(b"HOME=/root\0"), b"HOME=/root\\0\n\n\n");
        let mut spans = NulSpans::new(b"HOME=/root\0");
        assert_eq!(
            spans.next(),
            Some(Span {
                bytes: b"HOME=/root",
                terminated: true
            })
        );
        assert_eq!(spans.offset(), 11);
        assert_eq!(spans.next(), None);
    }

    #[test]
    fn test_leading_terminator() {
        assert_eq!(render(b"\0tail"), b"\\0\ntail\n\n");
    }

    #[test]
    fn test_consecutive_terminators_are_not_collapsed() {
        for k in 1..5 {
            let contents = vec![0u8; k];
            let spans = NulSpans::new(&contents).collect::<Vec<_>>();
            assert_eq!(spans.len(), k);
            assert!(spans.iter().all(|s| s.bytes.is_empty() && s.terminated));

            let mut expected = NUL_MARKER.repeat(k);
            expected.extend_from_slice(b"\n\n");
            assert_eq!(render(&contents), expected);
        }
    }

    #[test]
    fn test_environment_block() {
        let environ = b"PATH=/bin\0LANG=C\0\0TERM=xterm";
        assert_eq!(
            render(environ),
            b"PATH=/bin\\0\nLANG=C\\0\n\\0\nTERM=xterm\n\n".to_vec()
        );
    }

    #[test]
    fn test_bytes_pass_through() {
        let contents = [0xff, 0xfe, b'a', 0, 0x80];
        assert_eq!(render(&contents), b"\xff\xfea\\0\n\x80\n\n".to_vec());
    }

    #[test]
    fn test_stream_header() {
        let mut out = Vec::new();
        write_stream_header("LinuxCmdLine", &mut out).unwrap();
        assert_eq!(out, b"Stream LinuxCmdLine:\n");
    }
}
