//! Bundled lesson catalogue.
//!
//! Tutorial slides can point at a range of source lines to highlight once
//! the lesson's text is loaded into the surface.

use serde::Deserialize;

use super::highlight::LineRange;
use super::tab::Tutorial;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub lines_to_highlight: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub title: String,
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, Default)]
pub struct Lessons {
    lessons: Vec<Lesson>,
}

impl Lessons {
    /// The catalogue shipped with the editor. Malformed data falls back to
    /// an empty catalogue.
    pub fn bundled() -> Self {
        Self::from_json(include_str!("lessons.json")).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json)
            .map(|lessons| Self { lessons })
            .map_err(|e| format!("Failed to parse lessons: {}", e))
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Lesson> {
        self.lessons.get(index)
    }

    /// The line range the tutorial's current slide wants highlighted.
    pub fn lines_to_highlight(&self, tutorial: &Tutorial) -> Option<LineRange> {
        let lesson = self.lessons.get(tutorial.lesson_index)?;
        let slide = lesson.slides.get(tutorial.slide_index)?;
        LineRange::parse(slide.lines_to_highlight.as_deref()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalogue_parses() {
        let lessons = Lessons::bundled();
        assert!(!lessons.is_empty());
        assert!(!lessons.get(0).unwrap().slides.is_empty());
    }

    #[test]
    fn slide_ranges_resolve() {
        let lessons = Lessons::bundled();
        let tutorial = Tutorial {
            lesson_index: 0,
            slide_index: 1,
        };
        let range = lessons.lines_to_highlight(&tutorial).unwrap();
        assert_eq!((range.first(), range.last()), (2, 4));
    }

    #[test]
    fn slides_without_ranges_resolve_to_none() {
        let lessons = Lessons::bundled();
        let tutorial = Tutorial {
            lesson_index: 0,
            slide_index: 0,
        };
        assert_eq!(lessons.lines_to_highlight(&tutorial), None);
    }

    #[test]
    fn out_of_range_indices_resolve_to_none() {
        let lessons = Lessons::bundled();
        let tutorial = Tutorial {
            lesson_index: 99,
            slide_index: 0,
        };
        assert_eq!(lessons.lines_to_highlight(&tutorial), None);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Lessons::from_json("{not json").is_err());
    }
}
