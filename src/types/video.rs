/// A catalog entry. Entries are compiled in and never change at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Video {
    pub id: &'static str,
    pub title: &'static str,
    pub src: &'static str,
    pub poster: &'static str,
    pub description: &'static str,
}

pub const CATALOG: &[Video] = &[
    Video {
        id: "1",
        title: "Big Buck Bunny",
        src: "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
        poster: "placeholder.svg?height=720&width=1280",
        description: "A short computer-animated comedy film by the Blender Institute.",
    },
    Video {
        id: "2",
        title: "Sintel",
        src: "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/Sintel.mp4",
        poster: "placeholder.svg?height=720&width=1280",
        description: "A fantasy film about a young woman named Sintel who is searching for her lost baby dragon.",
    },
    Video {
        id: "3",
        title: "Tears of Steel",
        src: "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/TearsOfSteel.mp4",
        poster: "placeholder.svg?height=720&width=1280",
        description: "A short science fiction film about a group of scientists and artists who are trying to save the world.",
    },
    Video {
        id: "4",
        title: "For Bigger Blazes",
        src: "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
        poster: "placeholder.svg?height=720&width=1280",
        description: "A short film about a fire-breathing dragon.",
    },
    Video {
        id: "5",
        title: "For Bigger Escape",
        src: "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerEscapes.mp4",
        poster: "placeholder.svg?height=720&width=1280",
        description: "A short film about a daring escape.",
    },
];

/// Looks a video up by its catalog id.
pub fn find(id: &str) -> Option<&'static Video> {
    CATALOG.iter().find(|video| video.id == id)
}

/// The video shown when nothing else was asked for.
pub fn first() -> &'static Video {
    &CATALOG[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        for (i, video) in CATALOG.iter().enumerate() {
            assert!(
                CATALOG[i + 1..].iter().all(|other| other.id != video.id),
                "duplicate id {}",
                video.id
            );
        }
    }

    #[test]
    fn test_find_by_id() {
        assert_eq!(find("2").map(|v| v.title), Some("Sintel"));
        assert!(find("42").is_none());
        assert_eq!(first().id, "1");
    }
}
