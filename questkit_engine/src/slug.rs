/// Normalize a quest name or user-supplied lookup key into a slug.
pub fn sanitize_slug(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "quest".to_string();
    }

    let mut slug = String::new();
    let mut pending_dash = false;
    for ch in trimmed.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch.to_ascii_lowercase());
            pending_dash = false;
        } else if ch != '\'' {
            // apostrophes vanish: "Witch's House" -> "witchs-house"
            pending_dash = true;
        }
    }

    if slug.is_empty() { "quest".to_string() } else { slug }
}
