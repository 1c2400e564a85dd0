use crate::dates::date_key;
use crate::models::{Focus, Resource, ResourceCategory, Session};
use chrono::{Duration, NaiveDate};

const DAY_MS: i64 = 1000 * 60 * 60 * 24;

/// Sample history shown on first launch, dated relative to `today`.
pub fn default_sessions(today: NaiveDate) -> Vec<Session> {
    let on = |days_ago: i64| date_key(today - Duration::days(days_ago));
    vec![
        Session {
            date: on(2),
            location: "Indoor range".to_string(),
            focus: Focus::Form,
            arrows: 48,
            bullseyes: 9,
            quality: 4,
            notes: "Worked on a relaxed bow hand. Noticed cleaner release when I kept breath steady."
                .to_string(),
        },
        Session {
            date: on(5),
            location: "Backyard 15m".to_string(),
            focus: Focus::Accuracy,
            arrows: 36,
            bullseyes: 6,
            quality: 3,
            notes: "Grouping improved after slowing down between shots.".to_string(),
        },
        Session {
            date: on(7),
            location: "Club night".to_string(),
            focus: Focus::Mental,
            arrows: 60,
            bullseyes: 11,
            quality: 5,
            notes: "Shot a mini tournament round. Stayed composed and visualized each arrow."
                .to_string(),
        },
    ]
}

pub fn default_resources(now_ms: i64) -> Vec<Resource> {
    vec![
        Resource {
            id: "article-shot-sequence".to_string(),
            title: "Dial in Your Shot Sequence".to_string(),
            url: "https://archery360.com/2019/06/04/how-to-build-an-archery-shot-sequence/"
                .to_string(),
            category: ResourceCategory::Article,
            notes: "Step-by-step breakdown to tighten up consistency.".to_string(),
            added: now_ms - 7 * DAY_MS,
            completed: false,
        },
        Resource {
            id: "video-anchor-point".to_string(),
            title: "Finding a Repeatable Anchor Point".to_string(),
            url: "https://www.youtube.com/watch?v=YgJ6eBbg0xw".to_string(),
            category: ResourceCategory::Video,
            notes: "Coach John Dudley explains anchoring for accuracy.".to_string(),
            added: now_ms - 5 * DAY_MS,
            completed: false,
        },
        Resource {
            id: "equipment-arrow-tuning".to_string(),
            title: "Arrow Tuning Checklist".to_string(),
            url: "https://www.lancasterarchery.com/blogs/archery-how-to/bare-shaft-tuning-basics"
                .to_string(),
            category: ResourceCategory::Equipment,
            notes: "Use before your next tuning session.".to_string(),
            added: now_ms - 3 * DAY_MS,
            completed: false,
        },
    ]
}
