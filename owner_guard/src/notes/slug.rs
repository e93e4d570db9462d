//! URL slugs from note titles, transliterating Russian to Latin.

/// Build a URL-safe slug from `title`.
///
/// Lowercases, turns `&` into `and`, collapses whitespace and dashes into a
/// single `-`, drops anything that is not a Latin letter, digit, dash or Russian
/// letter, then transliterates the Russian letters.
///
/// ```
/// use owner_guard::slugify;
/// assert_eq!(slugify("Заголовок 2"), "zagolovok-2");
/// assert_eq!(slugify("Tom & Jerry"), "tom-and-jerry");
/// ```
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase().replace("&amp;", " and ").replace('&', " and ");

    let mut slug = String::with_capacity(lowered.len());
    let mut pending_dash = false;
    for c in lowered.chars() {
        if c.is_whitespace() || c == '-' {
            pending_dash = true;
            continue;
        }
        let Some(latin) = transliterate(c) else {
            continue;
        };
        if latin.is_empty() {
            continue;
        }
        if pending_dash && !slug.is_empty() {
            slug.push('-');
        }
        pending_dash = false;
        slug.push_str(latin);
    }
    slug
}

/// Latin spelling of an allowed character; `None` for characters that are dropped.
fn transliterate(c: char) -> Option<&'static str> {
    const ASCII: &str = "abcdefghijklmnopqrstuvwxyz0123456789";
    if c.is_ascii() {
        return ASCII.find(c).map(|i| &ASCII[i..=i]);
    }

    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(latin)
}
