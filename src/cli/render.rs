//! Terminal presentation shared by the commands.

use ansi_term::{Colour, Style};

use crate::{
    trackers::{hobbies::HobbyCategory, mood::Mood, planner::Activity, projects::ProjectStatus},
    utils::progress::Progress,
};

const PROGRESS_BAR_WIDTH: usize = 10;

/// Colours output only when it goes to a terminal.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn paint(&self, style: Style, text: impl AsRef<str>) -> String {
        if self.enabled {
            style.paint(text.as_ref()).to_string()
        } else {
            text.as_ref().to_string()
        }
    }

    pub fn heading(&self, text: impl AsRef<str>) -> String {
        self.paint(Colour::Cyan.bold(), text)
    }

    pub fn dim(&self, text: impl AsRef<str>) -> String {
        self.paint(Colour::Fixed(244).normal(), text)
    }

    pub fn activity(&self, activity: Activity, text: impl AsRef<str>) -> String {
        let style = match activity {
            Activity::Work => Colour::Blue.normal(),
            Activity::Study => Colour::Green.normal(),
            Activity::Gym => Colour::Yellow.normal(),
            Activity::Hobby => Colour::Purple.normal(),
            Activity::Free => Colour::Fixed(244).normal(),
        };
        self.paint(style, text)
    }

    pub fn mood(&self, mood: Mood) -> String {
        let style = match mood {
            Mood::Happy => Colour::Yellow.bold(),
            Mood::Sad => Colour::Blue.bold(),
            Mood::Stressed => Colour::Red.bold(),
            Mood::Motivated => Colour::Green.bold(),
            Mood::Tired => Colour::Fixed(244).bold(),
        };
        self.paint(style, format!("{} {}", mood.emoji(), mood))
    }

    pub fn category(&self, category: HobbyCategory) -> String {
        let style = match category {
            HobbyCategory::Painting => Colour::Purple.normal(),
            HobbyCategory::Reading => Colour::Blue.normal(),
            HobbyCategory::Cycling => Colour::Green.normal(),
            HobbyCategory::SkinCare => Colour::Fixed(211).normal(),
            HobbyCategory::HealthCare => Colour::Fixed(208).normal(),
            HobbyCategory::Other => Colour::Fixed(244).normal(),
        };
        self.paint(style, category.label())
    }

    pub fn status(&self, status: ProjectStatus) -> String {
        let style = match status {
            ProjectStatus::Started => Colour::Blue.bold(),
            ProjectStatus::InProgress => Colour::Yellow.bold(),
            ProjectStatus::Advanced => Colour::Fixed(208).bold(),
            ProjectStatus::Completed => Colour::Green.bold(),
        };
        self.paint(style, status.label())
    }

    /// Bar of [PROGRESS_BAR_WIDTH] cells followed by the percentage.
    pub fn progress(&self, progress: Progress) -> String {
        let filled = (*progress as usize * PROGRESS_BAR_WIDTH).div_ceil(100);
        let bar = format!(
            "{}{}",
            "#".repeat(filled),
            ".".repeat(PROGRESS_BAR_WIDTH - filled)
        );
        let style = match *progress {
            80.. => Colour::Green.normal(),
            60.. => Colour::Yellow.normal(),
            40.. => Colour::Fixed(208).normal(),
            _ => Colour::Red.normal(),
        };
        format!("[{}] {progress}", self.paint(style, bar))
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::progress::Progress;

    use super::Palette;

    #[test]
    fn test_plain_progress_bar() {
        let palette = Palette::plain();
        assert_eq!(palette.progress(Progress::clamped(0)), "[..........] 0%");
        assert_eq!(palette.progress(Progress::clamped(45)), "[#####.....] 45%");
        assert_eq!(palette.progress(Progress::clamped(100)), "[##########] 100%");
    }

    #[test]
    fn test_colours_only_when_enabled() {
        let text = Palette::new(true).heading("Planner");
        assert!(text.contains("\u{1b}["));
        assert_eq!(Palette::plain().heading("Planner"), "Planner");
    }
}
