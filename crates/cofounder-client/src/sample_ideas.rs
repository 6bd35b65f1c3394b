/// Ready-made ideas offered to users who want to try the tool without writing one.
pub const SAMPLE_IDEAS: &[&str] = &[
    "An app that uses AI to analyze food photos and give personalized nutrition advice based on your health goals",
    "A platform where freelancers can form temporary teams for projects, with AI matching skills and work styles",
    "A browser extension that summarizes long email threads and suggests reply drafts using AI",
];

/// Look up a sample idea by its 1-based position, as shown to users.
pub fn sample_idea(number: usize) -> Option<&'static str> {
    number.checked_sub(1).and_then(|i| SAMPLE_IDEAS.get(i)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_ideas_are_numbered_from_one() {
        assert_eq!(sample_idea(1), Some(SAMPLE_IDEAS[0]));
        assert_eq!(sample_idea(3), Some(SAMPLE_IDEAS[2]));
        assert_eq!(sample_idea(0), None);
        assert_eq!(sample_idea(4), None);
    }
}
