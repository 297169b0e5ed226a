//! Story data model and the built-in demo fixture.
//!
//! Groups and items are immutable once constructed; the player only
//! ever reads them. Any data source producing this shape works — the
//! fixture below stands in for the feed service.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// A single timed slide within a story group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryItem {
    pub id: u32,
    pub image_ref: String,
    /// Unix seconds.
    pub posted_at: u64,
}

/// One user's ordered set of ephemeral stories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryGroup {
    pub owner_handle: String,
    pub owner_avatar_ref: String,
    pub items: Vec<StoryItem>,
}

impl StoryGroup {
    /// First character of the owner's handle, for avatar stand-ins.
    pub fn initial(&self) -> char {
        self.owner_handle.chars().next().unwrap_or('?')
    }
}

fn group(
    handle: &str,
    avatar: &str,
    now_s: u64,
    items: &[(u32, u32, u64)], // (id, image number, age seconds)
) -> StoryGroup {
    StoryGroup {
        owner_handle: String::from(handle),
        owner_avatar_ref: String::from(avatar),
        items: items
            .iter()
            .map(|&(id, img, age_s)| StoryItem {
                id,
                image_ref: format!("stories/{}.jpg", img),
                posted_at: now_s.saturating_sub(age_s),
            })
            .collect(),
    }
}

/// Built-in demo story groups, aged relative to `now_s`.
pub fn sample_story_groups(now_s: u64) -> Vec<StoryGroup> {
    let mut groups = Vec::new();
    groups.push(group(
        "your_story",
        "avatars/1.png",
        now_s,
        &[(1, 101, 3_600), (2, 102, 7_200)],
    ));
    groups.push(group(
        "john_doe",
        "avatars/2.png",
        now_s,
        &[(3, 103, 1_800), (4, 104, 3_600), (5, 105, 5_400)],
    ));
    groups.push(group(
        "jane_smith",
        "avatars/3.png",
        now_s,
        &[(6, 106, 900)],
    ));
    groups.push(group(
        "mike_wilson",
        "avatars/4.png",
        now_s,
        &[(7, 107, 10_800), (8, 108, 14_400)],
    ));
    groups.push(group(
        "sarah_jones",
        "avatars/5.png",
        now_s,
        &[(9, 109, 7_200)],
    ));
    groups.push(group(
        "tom_brown",
        "avatars/6.png",
        now_s,
        &[(10, 110, 21_600)],
    ));
    groups.push(group(
        "emma_davis",
        "avatars/7.png",
        now_s,
        &[(11, 111, 5_400), (12, 112, 9_000)],
    ));
    groups.push(group(
        "alex_miller",
        "avatars/8.png",
        now_s,
        &[(13, 113, 1_800)],
    ));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_groups_are_non_empty() {
        let groups = sample_story_groups(1_700_000_000);
        assert_eq!(groups.len(), 8);
        assert!(groups.iter().all(|g| !g.items.is_empty()));
    }

    #[test]
    fn sample_items_age_relative_to_now() {
        let now = 1_700_000_000;
        let groups = sample_story_groups(now);
        assert_eq!(groups[0].items[0].posted_at, now - 3_600);
        assert_eq!(groups[1].items[0].posted_at, now - 1_800);
    }

    #[test]
    fn group_initial_falls_back_on_empty_handle() {
        let g = StoryGroup {
            owner_handle: String::new(),
            owner_avatar_ref: String::new(),
            items: alloc::vec::Vec::new(),
        };
        assert_eq!(g.initial(), '?');
    }
}
