//! Photo feed data model and the built-in demo fixture.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

/// A comment below a feed post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub author_handle: String,
    pub text: String,
}

/// One photo post in the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: u32,
    pub author_handle: String,
    pub avatar_ref: String,
    pub image_ref: String,
    pub caption: String,
    pub likes: u32,
    pub liked: bool,
    pub comments: Vec<Comment>,
    /// Unix seconds.
    pub posted_at: u64,
}

impl Post {
    /// Toggle the viewer's like and adjust the count, in memory only.
    pub fn toggle_like(&mut self) {
        if self.liked {
            self.likes = self.likes.saturating_sub(1);
        } else {
            self.likes += 1;
        }
        self.liked = !self.liked;
    }

    /// First character of the author's handle, for avatar stand-ins.
    pub fn initial(&self) -> char {
        self.author_handle.chars().next().unwrap_or('?')
    }
}

struct PostSeed {
    id: u32,
    author: &'static str,
    avatar: u32,
    image: u32,
    caption: &'static str,
    likes: u32,
    comments: &'static [(&'static str, &'static str)],
    age_s: u64,
}

const POST_SEEDS: &[PostSeed] = &[
    PostSeed {
        id: 1,
        author: "demo",
        avatar: 1,
        image: 1,
        caption: "Beautiful sunset today!",
        likes: 245,
        comments: &[("john_doe", "Amazing photo!"), ("jane_smith", "Love this!")],
        age_s: 3_600,
    },
    PostSeed {
        id: 2,
        author: "john_doe",
        avatar: 2,
        image: 10,
        caption: "Exploring new places #travel #adventure",
        likes: 892,
        comments: &[
            ("demo", "Where is this?"),
            ("sarah_jones", "Stunning view!"),
            ("mike_wilson", "Need to visit here!"),
        ],
        age_s: 5_400,
    },
    PostSeed {
        id: 3,
        author: "jane_smith",
        avatar: 3,
        image: 11,
        caption: "Morning coffee rituals",
        likes: 456,
        comments: &[("demo", "Looks delicious!")],
        age_s: 7_200,
    },
    PostSeed {
        id: 4,
        author: "demo",
        avatar: 1,
        image: 2,
        caption: "Coffee time",
        likes: 189,
        comments: &[("coffee_lover", "Perfect cup!")],
        age_s: 10_800,
    },
    PostSeed {
        id: 5,
        author: "mike_wilson",
        avatar: 4,
        image: 12,
        caption: "Gym gains #fitness #motivation",
        likes: 723,
        comments: &[("john_doe", "Beast mode!"), ("demo", "Keep it up!")],
        age_s: 14_400,
    },
    PostSeed {
        id: 6,
        author: "sarah_jones",
        avatar: 5,
        image: 13,
        caption: "Beach days are the best days",
        likes: 1_204,
        comments: &[("jane_smith", "So jealous!"), ("tom_brown", "Paradise!")],
        age_s: 18_000,
    },
    PostSeed {
        id: 7,
        author: "tom_brown",
        avatar: 6,
        image: 14,
        caption: "Late night coding session #developer #code",
        likes: 567,
        comments: &[("demo", "What are you building?")],
        age_s: 21_600,
    },
    PostSeed {
        id: 8,
        author: "demo",
        avatar: 1,
        image: 3,
        caption: "Weekend vibes",
        likes: 532,
        comments: &[],
        age_s: 25_200,
    },
    PostSeed {
        id: 9,
        author: "emma_davis",
        avatar: 7,
        image: 15,
        caption: "Art in progress. Creating something beautiful today",
        likes: 945,
        comments: &[
            ("jane_smith", "Your art is incredible!"),
            ("sarah_jones", "Love your style!"),
        ],
        age_s: 28_800,
    },
    PostSeed {
        id: 10,
        author: "alex_miller",
        avatar: 8,
        image: 16,
        caption: "New recipe attempt! Turned out amazing",
        likes: 612,
        comments: &[("mike_wilson", "Recipe please!")],
        age_s: 32_400,
    },
    PostSeed {
        id: 11,
        author: "john_doe",
        avatar: 2,
        image: 17,
        caption: "Golden hour magic",
        likes: 1_567,
        comments: &[
            ("demo", "Great shot!"),
            ("emma_davis", "The lighting is perfect!"),
        ],
        age_s: 43_200,
    },
    PostSeed {
        id: 12,
        author: "sarah_jones",
        avatar: 5,
        image: 18,
        caption: "Yoga and meditation. Finding my zen",
        likes: 823,
        comments: &[],
        age_s: 50_400,
    },
];

/// Built-in demo feed, aged relative to `now_s`.
pub fn sample_posts(now_s: u64) -> Vec<Post> {
    POST_SEEDS
        .iter()
        .map(|seed| Post {
            id: seed.id,
            author_handle: String::from(seed.author),
            avatar_ref: alloc::format!("avatars/{}.png", seed.avatar),
            image_ref: alloc::format!("photos/{}.jpg", seed.image),
            caption: String::from(seed.caption),
            likes: seed.likes,
            liked: false,
            comments: seed
                .comments
                .iter()
                .map(|&(author, text)| Comment {
                    author_handle: String::from(author),
                    text: String::from(text),
                })
                .collect(),
            posted_at: now_s.saturating_sub(seed.age_s),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_feed_shape() {
        let posts = sample_posts(1_700_000_000);
        assert_eq!(posts.len(), 12);
        assert!(posts.iter().all(|p| !p.liked));
        assert_eq!(posts[1].comments.len(), 3);
    }

    #[test]
    fn like_toggle_round_trips() {
        let mut post = sample_posts(1_700_000_000).remove(0);
        let before = post.likes;

        post.toggle_like();
        assert!(post.liked);
        assert_eq!(post.likes, before + 1);

        post.toggle_like();
        assert!(!post.liked);
        assert_eq!(post.likes, before);
    }
}
