//! The card deck.
//!
//! Cards are hand-authored and compiled in. Nothing mutates them; the
//! navigator only ever holds an index into [`CARDS`].

/// A labelled line on a "prep time" style card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrepTime {
    pub label: &'static str,
    pub value: &'static str,
}

/// One slide of the presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub message: Option<&'static str>,
    pub emoji: Option<&'static str>,
    pub items: &'static [&'static str],
    pub prep_times: &'static [PrepTime],
    /// Term -> definition, shown in a popover on request.
    pub definitions: &'static [(&'static str, &'static str)],
}

impl Card {
    const fn blank(title: &'static str, subtitle: &'static str) -> Self {
        Self {
            title,
            subtitle,
            message: None,
            emoji: None,
            items: &[],
            prep_times: &[],
            definitions: &[],
        }
    }

    /// Text read aloud when the card is narrated.
    ///
    /// Title, subtitle, message, items and prep times in display order,
    /// joined as sentences. Prep times are read too so the narrated card
    /// matches what is on screen. Definitions are not read.
    pub fn narration_text(&self) -> String {
        let mut parts: Vec<String> = vec![self.title.to_string(), self.subtitle.to_string()];
        if let Some(message) = self.message {
            parts.push(message.to_string());
        }
        parts.extend(self.items.iter().map(|item| item.to_string()));
        parts.extend(
            self.prep_times
                .iter()
                .map(|time| format!("{}: {}", time.label, time.value)),
        );

        parts
            .iter()
            .map(|part| part.trim().trim_end_matches(['.', '!', '?']))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(". ")
            + "."
    }
}

pub const CARDS: &[Card] = &[
    Card {
        emoji: Some("🫧"),
        message: Some(
            "I tried to write a script for this, but 'us' turned out to be something ineffable—too big for a basic greeting card. It’s less of a meeting and more of a serendipity; a lucky find I wasn't even looking for, but now can't imagine my day without.",
        ),
        definitions: &[
            ("Ineffable", "Too great or extreme to be expressed in words."),
            ("Serendipity", "Finding something good without looking for it."),
        ],
        ..Card::blank("Ineffable", "Beyond the vocabulary")
    },
    Card {
        items: &[
            "The incandescent way you explain things you’re passionate about",
            "That ethereal, quiet grace you have when the world gets too loud",
            "Your iridescent personality—how you can be a total dork and a genius in the same hour",
            "The luminescence in your eyes when we finally land on a joke only we get",
            "The halcyon peace I feel just sitting in a car with you, saying absolutely nothing",
            "How you turn a 'nothing' Tuesday into a state of eudaimonia—just flourishing",
            "The stubbornly human way you refuse to let a bad day win",
        ],
        definitions: &[
            ("Iridescent", "Showing luminous colours that shift with the angle of view."),
            ("Halcyon", "Idyllically calm and peaceful."),
            ("Eudaimonia", "A state of flourishing; a life well lived."),
        ],
        ..Card::blank("Iridescent", "All your different lights")
    },
    Card {
        items: &[
            "Trade high-level philosophy for your low-tier memes",
            "Practice redamancy: the act of loving back with everything you've got",
            "Find felicity in the tiny, boring moments—like choosing a movie for two hours",
            "Acknowledge that being human is messy, and that’s where the beauty lives",
            "Prioritize the aurora—the dawn of new ideas and 'do-overs' every single day",
            "Protect the incandescent spark that happens when we’re just being us",
        ],
        definitions: &[
            ("Redamancy", "The act of loving the one who loves you; a love returned in full."),
            ("Felicity", "Intense happiness."),
        ],
        ..Card::blank("Redamancy", "The art of giving back")
    },
    Card {
        prep_times: &[
            PrepTime {
                label: "The Serendipity",
                value: "Realizing you were the 'good thing' I wasn't even looking for",
            },
            PrepTime {
                label: "The Halcyon",
                value: "Finding a rare, idyllic happiness in our most random conversations",
            },
            PrepTime {
                label: "The Result",
                value: "Recognizing that knowing you is a genuine state of flourishing",
            },
        ],
        ..Card::blank("The Shift", "From noise to resonance")
    },
    Card {
        emoji: Some("🕯️"),
        message: Some(
            "You are altogether beautiful, from your incandescent mind to your very human quirks. Thanks for being the most iridescent part of my reality. Happy Valentine's Day.",
        ),
        items: &[
            "“You are altogether beautiful, my darling; there is no flaw in you.” — Song of Solomon 4:7",
        ],
        ..Card::blank("Final Note", "Just human beauty")
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_has_five_cards() {
        assert_eq!(CARDS.len(), 5);
        assert_eq!(CARDS[0].title, "Ineffable");
        assert_eq!(CARDS[4].title, "Final Note");
    }

    #[test]
    fn narration_text_joins_fields_in_order() {
        let text = CARDS[0].narration_text();
        assert!(text.starts_with("Ineffable. Beyond the vocabulary. I tried"));
        assert!(!text.contains("Too great"), "definitions are not narrated");
        assert!(text.ends_with('.'));
    }

    #[test]
    fn narration_text_includes_prep_times() {
        let text = CARDS[3].narration_text();
        assert!(text.contains("The Result: Recognizing that knowing you"));
    }
}
