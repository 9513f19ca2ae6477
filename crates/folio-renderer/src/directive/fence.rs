//! Code fence tracking.
//!
//! Tracks whether the parser is inside a fenced code block so that directive
//! syntax (`:::`) in code samples is left alone.

/// Tracks code fence state during line-by-line processing.
///
/// Code fences use backticks or tildes (three or more). The closing fence must
/// use the same character and be at least as long as the opening fence.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    /// Character used for the current fence (backtick or tilde).
    fence_char: Option<char>,
    /// Length of the opening fence (minimum length for closing).
    fence_len: usize,
}

/// Result of feeding one line to a [`FenceTracker`].
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum FenceEvent<'a> {
    /// Line opens a fence; carries the trimmed info string.
    Open(&'a str),
    /// Line closes the current fence.
    Close,
    /// Line is not a fence marker.
    None,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.fence_char.is_some()
    }

    /// Update fence state based on a line.
    pub(crate) fn update<'a>(&mut self, line: &'a str) -> FenceEvent<'a> {
        let trimmed = line.trim_start();

        if let Some(fence_char) = self.fence_char {
            if is_closing_fence(trimmed, fence_char, self.fence_len) {
                self.fence_char = None;
                self.fence_len = 0;
                return FenceEvent::Close;
            }
            return FenceEvent::None;
        }

        match detect_fence(trimmed) {
            Some((ch, len)) => {
                self.fence_char = Some(ch);
                self.fence_len = len;
                FenceEvent::Open(trimmed[len..].trim())
            }
            None => FenceEvent::None,
        }
    }
}

/// Detect if a line starts a code fence.
fn detect_fence(trimmed: &str) -> Option<(char, usize)> {
    let first = trimmed.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }

    let count = trimmed.chars().take_while(|&c| c == first).count();
    if count < 3 {
        return None;
    }

    // Backtick fences cannot carry backticks in their info string
    if first == '`' && trimmed[count..].contains('`') {
        return None;
    }

    Some((first, count))
}

/// Check if a line is a valid closing fence.
fn is_closing_fence(trimmed: &str, expected_char: char, min_len: usize) -> bool {
    let count = trimmed.chars().take_while(|&c| c == expected_char).count();
    if count == 0 || count < min_len {
        return false;
    }

    trimmed[count..].chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_fence_initially() {
        let tracker = FenceTracker::new();
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_open_reports_info_string() {
        let mut tracker = FenceTracker::new();

        assert_eq!(
            tracker.update("```dart title=\"main.dart\""),
            FenceEvent::Open("dart title=\"main.dart\"")
        );
        assert!(tracker.in_fence());
        assert_eq!(tracker.update("void main() {}"), FenceEvent::None);
        assert_eq!(tracker.update("```"), FenceEvent::Close);
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_tilde_fence_without_info() {
        let mut tracker = FenceTracker::new();

        assert_eq!(tracker.update("~~~"), FenceEvent::Open(""));
        assert_eq!(tracker.update("::: tabs"), FenceEvent::None);
        assert_eq!(tracker.update("~~~~"), FenceEvent::Close);
    }

    #[test]
    fn test_shorter_fence_does_not_close() {
        let mut tracker = FenceTracker::new();

        tracker.update("````");
        assert_eq!(tracker.update("```"), FenceEvent::None);
        assert!(tracker.in_fence());
        assert_eq!(tracker.update("````"), FenceEvent::Close);
    }

    #[test]
    fn test_mixed_fence_chars() {
        let mut tracker = FenceTracker::new();

        tracker.update("```");
        assert_eq!(tracker.update("~~~"), FenceEvent::None);
        assert_eq!(tracker.update("```"), FenceEvent::Close);
    }

    #[test]
    fn test_closing_fence_with_text_is_content() {
        let mut tracker = FenceTracker::new();

        tracker.update("```");
        assert_eq!(tracker.update("``` not a close"), FenceEvent::None);
        assert!(tracker.in_fence());
    }

    #[test]
    fn test_inline_code_is_not_fence() {
        let mut tracker = FenceTracker::new();

        assert_eq!(tracker.update("``inline code``"), FenceEvent::None);
        assert_eq!(tracker.update("```inline``` code"), FenceEvent::None);
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_indented_fence() {
        let mut tracker = FenceTracker::new();

        assert_eq!(tracker.update("   ```rust"), FenceEvent::Open("rust"));
        assert_eq!(tracker.update("  ```"), FenceEvent::Close);
    }
}
