//! Static project table and the title → asset filename mapping.
//!
//! The records are compile-time constants; nothing here touches the
//! filesystem or the UI.

use std::path::{Path, PathBuf};

/// Capacity of the filename buffer used when deriving asset names.  One byte
/// is reserved, so derived names are at most `FILENAME_CAPACITY - 1` bytes.
pub const FILENAME_CAPACITY: usize = 64;

/// One project shown as a card on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub link: &'static str,
}

impl Project {
    /// Asset filename (without extension) derived from the title.
    pub fn image_filename(&self) -> String {
        image_filename(self.title, FILENAME_CAPACITY)
    }

    /// Full thumbnail path under `assets_dir`.
    pub fn image_path(&self, assets_dir: &Path) -> PathBuf {
        assets_dir.join("projects").join(format!("{}.png", self.image_filename()))
    }
}

/// All projects, in display order.
pub static PROJECTS: [Project; 6] = [
    Project {
        title: "Carousel",
        description: "A beautifully crafted decision-making tool that brings joy to your choices. Spin the wheel to randomly select activities, make decisions, or add excitement to your daily routine. Perfect for teams, families, or personal use.",
        link: "https://carousel.waozi.xyz",
    },
    Project {
        title: "Quest",
        description: "Your personal journey companion. Track habits, organize tasks, and visualize your life progress through an intuitive interface. Features daily challenges, progress tracking, and beautiful data visualization to help you achieve your goals.",
        link: "http://quest.naox.io/",
    },
    Project {
        title: "Inner Breeze",
        description: "A comprehensive wellness app combining guided meditation, yoga, and breathing exercises. Features custom Wim Hof breathing sessions, guided meditations, and personalized yoga routines for all skill levels.",
        link: "https://inbreeze.xyz",
    },
    Project {
        title: "Traveltint",
        description: "Interactive world map journey tracker. Pin your adventures, share stories, and visualize your global footprint. Create beautiful travel timelines, track countries visited, and set exploration goals.",
        link: "https://traveltint.xyz",
    },
    Project {
        title: "Lyra",
        description: "Revolutionary identity management platform using Nostr protocol. Securely manage your online presence, login across platforms with one identity, and control your digital footprint with ease.",
        link: "https://lyra.xyz",
    },
    Project {
        title: "Rocks",
        description: "A powerful framework built on Clay, designed for developers who want flexibility in rendering and component management. Includes pre-built components and easy renderer switching for rapid application development.",
        link: "https://github.com/naoxio/rocks",
    },
];

/// Derive an asset filename from a display title.
///
/// Spaces become `_`, ASCII letters are lowercased, everything else passes
/// through untouched (so `"Bob's Game"` yields `"bob's_game"`).  At most
/// `capacity - 1` bytes are produced and a multi-byte character that would
/// not fit is dropped whole.
pub fn image_filename(title: &str, capacity: usize) -> String {
    let limit = capacity.saturating_sub(1);
    let mut out = String::with_capacity(limit.min(title.len()));
    for ch in title.chars() {
        let mapped = if ch == ' ' { '_' } else { ch.to_ascii_lowercase() };
        if out.len() + mapped.len_utf8() > limit {
            break;
        }
        out.push(mapped);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_spaces_map_to_lowercase_underscores() {
        assert_eq!(image_filename("Inner Breeze", FILENAME_CAPACITY), "inner_breeze");
        assert_eq!(image_filename("Traveltint", FILENAME_CAPACITY), "traveltint");
        assert_eq!(image_filename("A B  C", FILENAME_CAPACITY), "a_b__c");
    }

    #[test]
    fn punctuation_passes_through_unchanged() {
        assert_eq!(image_filename("Bob's Game!", FILENAME_CAPACITY), "bob's_game!");
    }

    #[test]
    fn truncates_to_capacity_minus_one() {
        let long = "Word ".repeat(40);
        for capacity in [0, 1, 2, 5, 17, 64, 300] {
            let name = image_filename(&long, capacity);
            assert!(name.len() <= capacity.saturating_sub(1), "capacity {capacity}");
        }
        assert_eq!(image_filename("Carousel", 4), "car");
        assert_eq!(image_filename("Carousel", 0), "");
        assert_eq!(image_filename("Carousel", 1), "");
    }

    #[test]
    fn truncation_never_splits_a_character() {
        // "é" is two bytes; only one byte of room remains after "ab".
        assert_eq!(image_filename("abé", 4), "ab");
        assert_eq!(image_filename("abé", 5), "abé");
    }

    #[test]
    fn project_paths_follow_declared_order() {
        let paths: Vec<PathBuf> = PROJECTS
            .iter()
            .map(|p| p.image_path(Path::new("assets")))
            .collect();
        let expected: Vec<PathBuf> = ["carousel", "quest", "inner_breeze", "traveltint", "lyra", "rocks"]
            .iter()
            .map(|n| PathBuf::from(format!("assets/projects/{n}.png")))
            .collect();
        assert_eq!(paths, expected);
    }

    #[test]
    fn table_is_stable_across_reads() {
        let first: Vec<Project> = PROJECTS.to_vec();
        let second: Vec<Project> = PROJECTS.iter().copied().collect();
        assert_eq!(first, second);
        assert_eq!(PROJECTS.len(), 6);
        assert!(PROJECTS.iter().all(|p| p.link.starts_with("http")));
    }
}
