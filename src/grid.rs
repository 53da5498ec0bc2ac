use crate::fact::{Factor, MultiplicationFact};

const EMOJIS: [&str; 7] = ["🍎", "⭐️", "🐱", "🎈", "🍪", "🌸", "🚙"];

/// The 9×9 product table as monospace text. Squares are bracketed.
pub fn render_grid() -> String {
    let mut lines = Vec::with_capacity(10);

    let header = Factor::all()
        .map(|col| format!("{:>4}", col.get()))
        .collect::<String>();
    lines.push(format!(" ×|{}", header));
    lines.push(format!("--+{}", "-".repeat(header.len())));

    for row in Factor::all() {
        let cells = Factor::all()
            .map(|col| {
                let product = row.get() * col.get();
                if row == col {
                    format!("{:>4}", format!("[{}]", product))
                } else {
                    format!("{:>4}", product)
                }
            })
            .collect::<String>();
        lines.push(format!("{:>2}|{}", row.get(), cells));
    }

    lines.join("\n")
}

/// Same emoji for the same pair of factors, so the picture is stable.
pub fn emoji_for(fact: &MultiplicationFact) -> &'static str {
    EMOJIS[((fact.a.get() + fact.b.get()) as usize) % EMOJIS.len()]
}

/// The worked example for one cell: `a` groups of `b` things.
pub fn render_explainer(fact: &MultiplicationFact) -> String {
    let (a, b) = (fact.a.get(), fact.b.get());
    let emoji = emoji_for(fact);

    let groups = (1..=a)
        .map(|row| format!("{}: {}", row, emoji.repeat(b as usize)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<b>{a} × {b} = {result}</b>\n<b>{chant}</b>\n\n\
        ⚡ What does it mean?\n\
        It means <b>{a}</b> groups of <b>{b}</b>!\n\
        (也就是 {a} 个 {b})\n\n\
        {groups}\n\n\
        Total count: {result} {emoji}",
        result = fact.result,
        chant = fact.chinese_text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(a: u32, b: u32) -> MultiplicationFact {
        MultiplicationFact::new(Factor::new(a).unwrap(), Factor::new(b).unwrap())
    }

    #[test]
    fn grid_lists_every_product() {
        let grid = render_grid();
        let lines = grid.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 11);
        assert!(lines[0].ends_with("   9"));
        assert!(lines[4].starts_with(" 3|"));
        assert!(lines[4].contains("  12"));
        assert!(lines[4].contains(" [9]"));
        assert!(lines[10].ends_with("[81]"));
        // every row is as wide as the header
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn explainer_draws_a_groups_of_b() {
        let fact = fact(3, 4);
        let emoji = emoji_for(&fact);
        assert_eq!(emoji, "🍎");

        let text = render_explainer(&fact);
        assert!(text.starts_with("<b>3 × 4 = 12</b>\n<b>三四十二</b>"));
        assert!(text.contains("(也就是 3 个 4)"));
        assert!(text.contains(&format!("3: {}", emoji.repeat(4))));
        assert!(!text.contains("4: "));
        assert!(text.ends_with("Total count: 12 🍎"));
    }

    #[test]
    fn emoji_depends_on_the_pair() {
        assert_eq!(emoji_for(&fact(1, 1)), "🐱");
        assert_eq!(emoji_for(&fact(9, 9)), "🍪");
        assert_eq!(emoji_for(&fact(2, 5)), emoji_for(&fact(5, 2)));
    }
}
