//! Splits an OTP notification message into plain and emphasised parts.
//!
//! Only the first verbatim occurrence of the OTP is emphasised. The split is
//! done by byte offsets, so OTP values containing characters that would be
//! special to a delimiter-based split are handled like any other text.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Emphasized(&'a str),
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Plain(text) | Segment::Emphasized(text) => text,
        }
    }

    pub fn is_emphasized(&self) -> bool {
        matches!(self, Segment::Emphasized(_))
    }
}

/// Byte range of the first occurrence of `otp` in `message`.
pub fn find_otp_range(message: &str, otp: &str) -> Option<Range<usize>> {
    if otp.is_empty() {
        return None;
    }
    message.find(otp).map(|start| start..start + otp.len())
}

pub fn highlight_segments<'a>(message: &'a str, otp: &str) -> Vec<Segment<'a>> {
    let Some(range) = find_otp_range(message, otp) else {
        return vec![Segment::Plain(message)];
    };

    let mut segments = Vec::with_capacity(3);
    if range.start > 0 {
        segments.push(Segment::Plain(&message[..range.start]));
    }
    segments.push(Segment::Emphasized(&message[range.clone()]));
    if range.end < message.len() {
        segments.push(Segment::Plain(&message[range.end..]));
    }
    segments
}

/// Plain-text rendering with the emphasised part wrapped in `open`/`close`.
pub fn mark_otp(message: &str, otp: &str, open: &str, close: &str) -> String {
    highlight_segments(message, otp)
        .into_iter()
        .map(|segment| match segment {
            Segment::Plain(text) => text.to_string(),
            Segment::Emphasized(text) => format!("{open}{text}{close}"),
        })
        .collect()
}
