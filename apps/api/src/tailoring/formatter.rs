//! Tailored-résumé formatter. Turns the model's free text into labeled sections.
//!
//! The completion is expected to hold seven blank-line-separated blocks in a
//! fixed order (see `prompts::TAILOR_SYSTEM`). Each block opens with a header
//! line followed by `- ` items. Position decides which section a block is;
//! nothing in the text itself is trusted to say so.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::tailoring::highlight::{highlight, plain, Fragment};

pub const SECTION_COUNT: usize = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("tailored text is empty")]
    Empty,

    #[error("expected {expected} sections in tailored text, found {found}")]
    MissingSections { expected: usize, found: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    KeyModifications,
    CoreCompetencies,
    WorkExperience,
    ProjectA,
    ProjectB,
    ProjectC,
    OtherExperience,
}

impl SectionKind {
    /// Block order of the tailored text.
    pub const ORDER: [SectionKind; SECTION_COUNT] = [
        SectionKind::KeyModifications,
        SectionKind::CoreCompetencies,
        SectionKind::WorkExperience,
        SectionKind::ProjectA,
        SectionKind::ProjectB,
        SectionKind::ProjectC,
        SectionKind::OtherExperience,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::KeyModifications => "첨삭한 주요 수정사항 키워드",
            SectionKind::CoreCompetencies => "핵심역량",
            SectionKind::WorkExperience => "직무경험",
            SectionKind::ProjectA => "프로젝트 A",
            SectionKind::ProjectB => "프로젝트 B",
            SectionKind::ProjectC => "프로젝트 C",
            SectionKind::OtherExperience => "그 외 관련 경력",
        }
    }

    /// Why the section was rewritten, shown next to it.
    pub fn rationale(self) -> &'static str {
        match self {
            SectionKind::KeyModifications => "JD 키워드 반영, 불필요한 정보 제거, 관련 경험 강조",
            SectionKind::CoreCompetencies => "JD 요구사항 일치 역량 선별, 상세 설명 추가",
            SectionKind::WorkExperience => "JD 관련 경험 선별, 성과 중심 서술, 구체적 수치 포함",
            SectionKind::ProjectA | SectionKind::ProjectB | SectionKind::ProjectC => {
                "JD 연관 프로젝트 선별, 기술 스택 및 성과 강조"
            }
            SectionKind::OtherExperience => "JD 관련 추가 경력 및 자격 선별, 불필요 정보 제거",
        }
    }

    /// Label of the original-résumé material this section replaces.
    pub fn source_hint(self) -> &'static str {
        match self {
            SectionKind::KeyModifications => "원본 이력서",
            SectionKind::CoreCompetencies => "원본 핵심역량 섹션",
            SectionKind::WorkExperience => "원본 직무경험 섹션",
            SectionKind::ProjectA => "원본 프로젝트 A 내용",
            SectionKind::ProjectB => "원본 프로젝트 B 내용",
            SectionKind::ProjectC => "원본 프로젝트 C 내용",
            SectionKind::OtherExperience => "원본 기타 경력 섹션",
        }
    }

    pub fn is_project(self) -> bool {
        matches!(
            self,
            SectionKind::ProjectA | SectionKind::ProjectB | SectionKind::ProjectC
        )
    }

    /// Keyword emphasis applies everywhere except the key-modifications list.
    pub fn highlights_keywords(self) -> bool {
        self != SectionKind::KeyModifications
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionItem {
    pub text: String,
    pub fragments: Vec<Fragment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TailoredSection {
    pub kind: SectionKind,
    pub title: String,
    pub rationale: &'static str,
    pub source_hint: &'static str,
    pub items: Vec<SectionItem>,
}

#[cfg(test)]
impl TailoredSection {
    pub fn item_texts(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedResume {
    pub sections: Vec<TailoredSection>,
}

#[cfg(test)]
impl FormattedResume {
    pub fn section(&self, kind: SectionKind) -> Option<&TailoredSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

/// Parses tailored text into its seven sections.
///
/// Fewer than seven blocks is an error rather than a partial result. Blocks
/// past the seventh are dropped with a warning.
pub fn format_tailored(raw: &str) -> Result<FormattedResume, FormatError> {
    let blocks = split_blocks(raw);

    if blocks.is_empty() {
        return Err(FormatError::Empty);
    }
    if blocks.len() < SECTION_COUNT {
        return Err(FormatError::MissingSections {
            expected: SECTION_COUNT,
            found: blocks.len(),
        });
    }
    if blocks.len() > SECTION_COUNT {
        warn!(
            "Tailored text has {} blocks, ignoring {} past the expected {}",
            blocks.len(),
            blocks.len() - SECTION_COUNT,
            SECTION_COUNT
        );
    }

    let sections = SectionKind::ORDER
        .iter()
        .zip(blocks)
        .map(|(&kind, block)| build_section(kind, &block))
        .collect();

    Ok(FormattedResume { sections })
}

/// Splits on blank (whitespace-only) lines; runs of blank lines count once.
fn split_blocks(raw: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in raw.lines() {
        // A lone '\r' on the final line survives `lines()`.
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

fn build_section(kind: SectionKind, block: &[&str]) -> TailoredSection {
    let (header, body) = match block.split_first() {
        Some((header, body)) => (*header, body),
        None => ("", block),
    };

    let title = if kind.is_project() {
        let header = header.trim().trim_end_matches(':').trim_end();
        if header.is_empty() {
            kind.title().to_string()
        } else {
            header.to_string()
        }
    } else {
        kind.title().to_string()
    };

    let items = body
        .iter()
        .map(|line| {
            let text = strip_marker(line);
            let fragments = if kind.highlights_keywords() {
                highlight(&text)
            } else {
                plain(&text)
            };
            SectionItem { text, fragments }
        })
        .collect();

    TailoredSection {
        kind,
        title,
        rationale: kind.rationale(),
        source_hint: kind.source_hint(),
        items,
    }
}

fn strip_marker(line: &str) -> String {
    let trimmed = line.trim();
    trimmed
        .strip_prefix("- ")
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}
