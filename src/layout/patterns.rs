//! Textual heading patterns.
//!
//! Numbering conventions and keywords are expressed as an ordered list of
//! rules. Evaluation stops at the first rule that matches; each rule decides
//! its own heading level and how the heading text is cleaned up.

use crate::layout::heading_detector::HeadingLevel;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Arabic section numbers: "1 ", "2.1 ", "3.4.1 "
    static ref RE_NUMBERED: Regex = Regex::new(r"^(\d+(?:\.\d+)*)\s+").unwrap();

    /// Parenthesized item markers: "(1)", "(a)"
    static ref RE_PARENTHESIZED: Regex = Regex::new(r"^\s*\([\w\d]\)\s*").unwrap();

    /// Japanese chapter marker (第N章)
    static ref RE_JA_CHAPTER: Regex = Regex::new(r"^第[一二三四五六七八九十\d]+章").unwrap();

    /// Japanese section marker (第N節)
    static ref RE_JA_SECTION: Regex = Regex::new(r"^第[一二三四五六七八九十\d]+節").unwrap();

    /// Japanese clause marker (第N項)
    static ref RE_JA_CLAUSE: Regex = Regex::new(r"^第[一二三四五六七八九十\d]+項").unwrap();

    /// Japanese item marker (第N目)
    static ref RE_JA_ITEM: Regex = Regex::new(r"^第[一二三四五六七八九十\d]+目").unwrap();

    /// "Appendix", "Appendix A: ...", "Appendix 2 ..." after optional numbering
    static ref RE_APPENDIX_LABELED: Regex =
        Regex::new(r"(?i)^\s*(?:[\d\W_]*\s*)?(Appendix\s*(?:[A-Z]|\d+)?[:\s].*)").unwrap();

    /// A bare "Appendix" line
    static ref RE_APPENDIX_BARE: Regex =
        Regex::new(r"(?i)^\s*(?:[\d\W_]*\s*)?(Appendix)$").unwrap();

    /// "Conclusion" / "Conclusions" after optional numbering
    static ref RE_CONCLUSION: Regex =
        Regex::new(r"(?i)^\s*(?:[\d\W_]*\s*)?(Conclusions|Conclusion)\s*[:\s]?.*").unwrap();
}

/// Family a pattern rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Decimal section numbering ("2.1 Scope")
    Numbered,
    /// Parenthesized item marker ("(a) Terms")
    Parenthesized,
    /// Script-specific chapter/section markers
    ScriptMarker,
    /// Fixed section keywords (Appendix, Conclusion)
    Keyword,
}

impl PatternKind {
    /// Keyword matches are final: font evidence cannot change their level.
    pub fn overrides_font(&self) -> bool {
        matches!(self, PatternKind::Keyword)
    }
}

/// How a rule determines the heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelRule {
    /// Depth of the dotted number in capture group 1, clamped to H1..H5.
    NumberingDepth,
    /// Always the given level.
    Fixed(HeadingLevel),
}

/// How a rule produces the cleaned heading text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRule {
    /// Everything after the matched prefix.
    AfterMatch,
    /// The whole line.
    FullLine,
    /// Capture group 1.
    Capture,
}

/// A single (matcher, level) pair.
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Rule family
    pub kind: PatternKind,
    regex: Regex,
    level: LevelRule,
    text: TextRule,
}

/// Outcome of the first matching rule.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternMatch {
    /// Family of the rule that matched
    pub kind: PatternKind,
    /// Level decided by the rule
    pub level: HeadingLevel,
    /// Cleaned heading text
    pub text: String,
}

impl PatternRule {
    /// Create a rule.
    pub fn new(kind: PatternKind, regex: Regex, level: LevelRule, text: TextRule) -> Self {
        Self {
            kind,
            regex,
            level,
            text,
        }
    }

    /// Apply the rule to an already trimmed line.
    pub fn apply(&self, line: &str) -> Option<PatternMatch> {
        let caps = self.regex.captures(line)?;
        let whole = caps.get(0)?;

        let level = match self.level {
            LevelRule::Fixed(level) => level,
            LevelRule::NumberingDepth => {
                let number = caps.get(1).map_or("", |m| m.as_str());
                HeadingLevel::from_depth(number.matches('.').count() + 1)
            },
        };

        let text = match self.text {
            TextRule::AfterMatch => line[whole.end()..].trim(),
            TextRule::FullLine => line,
            TextRule::Capture => caps.get(1).map_or(line, |m| m.as_str()).trim(),
        };

        Some(PatternMatch {
            kind: self.kind,
            level,
            text: text.to_string(),
        })
    }
}

fn script_rule(re: &Regex, level: HeadingLevel) -> PatternRule {
    PatternRule::new(
        PatternKind::ScriptMarker,
        re.clone(),
        LevelRule::Fixed(level),
        TextRule::FullLine,
    )
}

fn keyword_rule(re: &Regex) -> PatternRule {
    PatternRule::new(
        PatternKind::Keyword,
        re.clone(),
        LevelRule::Fixed(HeadingLevel::H2),
        TextRule::Capture,
    )
}

/// Ordered list of heading pattern rules.
#[derive(Debug, Clone)]
pub struct PatternSet {
    rules: Vec<PatternRule>,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl PatternSet {
    /// The standard rule chain: numbering, parenthesized markers, Japanese
    /// structural markers, then section keywords.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                PatternRule::new(
                    PatternKind::Numbered,
                    RE_NUMBERED.clone(),
                    LevelRule::NumberingDepth,
                    TextRule::AfterMatch,
                ),
                PatternRule::new(
                    PatternKind::Parenthesized,
                    RE_PARENTHESIZED.clone(),
                    LevelRule::Fixed(HeadingLevel::H3),
                    TextRule::AfterMatch,
                ),
                script_rule(&RE_JA_CHAPTER, HeadingLevel::H1),
                script_rule(&RE_JA_SECTION, HeadingLevel::H2),
                script_rule(&RE_JA_CLAUSE, HeadingLevel::H3),
                script_rule(&RE_JA_ITEM, HeadingLevel::H4),
                keyword_rule(&RE_APPENDIX_LABELED),
                keyword_rule(&RE_APPENDIX_BARE),
                keyword_rule(&RE_CONCLUSION),
            ],
        }
    }

    /// Build a set from explicit rules, evaluated in the given order.
    pub fn from_rules(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    /// Append a rule at the lowest priority.
    pub fn push(&mut self, rule: PatternRule) {
        self.rules.push(rule);
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// First matching rule's outcome for a trimmed line.
    pub fn first_match(&self, line: &str) -> Option<PatternMatch> {
        self.rules.iter().find_map(|rule| rule.apply(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(line: &str) -> Option<(PatternKind, HeadingLevel, String)> {
        PatternSet::standard()
            .first_match(line)
            .map(|m| (m.kind, m.level, m.text))
    }

    #[test]
    fn test_numbering_depth() {
        assert_eq!(
            matched("1 Introduction"),
            Some((PatternKind::Numbered, HeadingLevel::H1, "Introduction".to_string()))
        );
        assert_eq!(
            matched("1.2.3 Scope"),
            Some((PatternKind::Numbered, HeadingLevel::H3, "Scope".to_string()))
        );
    }

    #[test]
    fn test_numbering_depth_is_clamped() {
        let (_, level, text) = matched("1.2.3.4.5.6.7 Deep").unwrap();
        assert_eq!(level, HeadingLevel::H5);
        assert_eq!(text, "Deep");
    }

    #[test]
    fn test_numbering_requires_whitespace() {
        assert_eq!(matched("1. Introduction").map(|m| m.0), None);
        assert_eq!(matched("2024"), None);
    }

    #[test]
    fn test_parenthesized() {
        assert_eq!(
            matched("(a) Definitions"),
            Some((PatternKind::Parenthesized, HeadingLevel::H3, "Definitions".to_string()))
        );
        assert_eq!(
            matched("(3)Payment terms"),
            Some((PatternKind::Parenthesized, HeadingLevel::H3, "Payment terms".to_string()))
        );
    }

    #[test]
    fn test_japanese_markers() {
        assert_eq!(
            matched("第一章 総則"),
            Some((PatternKind::ScriptMarker, HeadingLevel::H1, "第一章 総則".to_string()))
        );
        assert_eq!(matched("第2節 定義").unwrap().1, HeadingLevel::H2);
        assert_eq!(matched("第十項").unwrap().1, HeadingLevel::H3);
        assert_eq!(matched("第3目 細則").unwrap().1, HeadingLevel::H4);
    }

    #[test]
    fn test_appendix_keyword() {
        assert_eq!(
            matched("Appendix A: Data"),
            Some((PatternKind::Keyword, HeadingLevel::H2, "Appendix A: Data".to_string()))
        );
        assert_eq!(matched("APPENDIX").unwrap().2, "APPENDIX");
        assert_eq!(matched("- Appendix 2 Tables").unwrap().2, "Appendix 2 Tables");
    }

    #[test]
    fn test_conclusion_keyword() {
        assert_eq!(
            matched("Conclusions"),
            Some((PatternKind::Keyword, HeadingLevel::H2, "Conclusions".to_string()))
        );
        assert_eq!(matched("4) Conclusion: next steps").unwrap().2, "Conclusion");
    }

    #[test]
    fn test_numbering_wins_over_keyword() {
        let (kind, level, text) = matched("5 Conclusion").unwrap();
        assert_eq!(kind, PatternKind::Numbered);
        assert_eq!(level, HeadingLevel::H1);
        assert_eq!(text, "Conclusion");
    }

    #[test]
    fn test_plain_text_has_no_match() {
        assert_eq!(matched("The results are summarised below"), None);
    }

    #[test]
    fn test_custom_rule_appended() {
        let mut set = PatternSet::standard();
        set.push(PatternRule::new(
            PatternKind::Keyword,
            Regex::new(r"(?i)^(References)$").unwrap(),
            LevelRule::Fixed(HeadingLevel::H1),
            TextRule::Capture,
        ));
        let m = set.first_match("References").unwrap();
        assert_eq!(m.level, HeadingLevel::H1);
        assert_eq!(set.rules().len(), 10);
    }
}
