//! Combinatorial demo-text synthesizer.
//!
//! Builds a plausible statement for a given mental-state category by drawing
//! one opener, one symptom description and one closer uniformly at random
//! from fixed phrase pools. Pure aside from the injected random source; no
//! state is retained between calls.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::models::Label;

fn openers(category: Label) -> &'static [&'static str] {
    match category {
        Label::Anxiety => &[
            "I don't know why, but ",
            "Lately, ",
            "Every time I wake up, ",
            "It's been a week and ",
        ],
        Label::Depression => &[
            "Everything feels so heavy. ",
            "I've lost interest in everything. ",
            "I'm just so tired. ",
            "People keep asking if I'm okay but ",
        ],
        Label::Normal => &[
            "Today was actually decent. ",
            "I've been focusing on my routine. ",
            "It's a sunny day and ",
            "I feel like ",
        ],
        Label::Suicidal => &[
            "I'm at the end of my rope. ",
            "I can't take this pain anymore. ",
            "It feels hopeless. ",
            "I keep thinking that ",
        ],
    }
}

fn symptoms(category: Label) -> &'static [&'static str] {
    match category {
        Label::Anxiety => &[
            "my heart starts racing for no reason.",
            "my hands won't stop shaking when I think about the future.",
            "I feel like I'm constantly on edge, waiting for something bad to happen.",
            "I can't focus on anything because my mind is spinning with 'what-ifs'.",
        ],
        Label::Depression => &[
            "I haven't left my room in days and the light hurts my eyes.",
            "I feel like I'm drowning in a thick, dark fog that won't lift.",
            "even the simplest tasks like brushing my teeth feel like climbing a mountain.",
            "I just want to sleep forever because being awake is too exhausting.",
        ],
        Label::Normal => &[
            "I managed to get some work done and even went for a jog.",
            "I'm enjoying the small things, like a good cup of coffee.",
            "it's nice to just relax without feeling guilty about it.",
            "I'm feeling balanced and ready to tackle the week ahead.",
        ],
        Label::Suicidal => &[
            "the world would truly be a better place if I wasn't in it.",
            "nothing matters anymore and I just want to disappear completely.",
            "I've started giving away my things because I won't need them soon.",
            "the darkness is winning and I don't have the strength to fight it anymore.",
        ],
    }
}

fn closers(category: Label) -> &'static [&'static str] {
    match category {
        Label::Anxiety => &[
            " Does this ever stop?",
            " I'm terrified of what's coming next.",
            " I just want to feel calm for once.",
            " My chest feels so tight.",
        ],
        Label::Depression => &[
            " I don't think I'll ever feel happy again.",
            " I'm just a burden to everyone around me.",
            " I feel completely empty inside.",
            " Why is everything so hard?",
        ],
        Label::Normal => &[
            " I'm going to try to keep this momentum going.",
            " It's good to feel like myself again.",
            " I'm planning to meet a friend later.",
            " Life is finally feeling manageable.",
        ],
        Label::Suicidal => &[
            " I've made up my mind.",
            " There is no help for someone like me.",
            " Please just let me go.",
            " I'm so sorry for everything.",
        ],
    }
}

/// Generates a scenario for `category` using the supplied random source.
///
/// Injecting the source keeps tests deterministic; production callers go
/// through [`generate`].
pub fn generate_with<R: Rng + ?Sized>(category: Label, rng: &mut R) -> String {
    let opener = openers(category).choose(rng).copied().unwrap_or("");
    let symptom = symptoms(category).choose(rng).copied().unwrap_or("");
    let closer = closers(category).choose(rng).copied().unwrap_or("");
    format!("{}{}{}", opener, symptom, closer)
}

/// Generates a scenario for `category` with a fresh thread-local source.
pub fn generate(category: Label) -> String {
    generate_with(category, &mut rand::rng())
}
