//! Canned orb phrases: per-category pools and fixed messages

use rand::seq::SliceRandom;
use rand::Rng;
use crate::types::TruthCategory;

const IMPOSSIBLE_VERDICTS: &[&str] = &[
    "The orb darkens with deep skepticism. Such claims defy the natural laws. 🔮",
    "The mystical energies recoil from these impossible words. 🪄",
    "A shadow passes through the orb. The scales of truth find your claim wanting. ⚖️",
    "The orb trembles with disbelief. Such claims are beyond mortal reach. 🌑",
];

const UNLIKELY_VERDICTS: &[&str] = &[
    "The orb's mist swirls with doubt. Your words carry shadows of untruth. ✨",
    "Ripples of uncertainty disturb the orb's surface. The truth bends but does not break. 🌊",
    "The orb dims slightly. Your statement treads the edge of credibility. 🔍",
    "Flickers of skepticism dance within the orb. Truth is elusive in your words. 💭",
];

const NEUTRAL_VERDICTS: &[&str] = &[
    "The orb swirls with balanced energies. Truth and uncertainty exist in equilibrium. ☯️",
    "Neither light nor shadow dominates the orb. Your words walk the middle path. ✨",
    "The mystical mist within the orb neither confirms nor denies. Balance prevails. 🌀",
    "The orb pulses steadily. Your statement contains elements of both truth and uncertainty. 💫",
];

const LIKELY_VERDICTS: &[&str] = &[
    "The orb glows with gentle affirmation. Your words likely align with reality. ✨",
    "Soft light emanates from within. Your statement resonates with probable truth. 🌟",
    "The mists within the orb part slightly. Your words are touched by authenticity. 💫",
    "A warm pulse emanates from the orb. Your statement carries the essence of truth. ✨",
];

const TRUE_VERDICTS: &[&str] = &[
    "The orb radiates with brilliant light! Your words resonate with profound truth. 💫",
    "Pure energy surges through the orb. Your statement aligns with the highest truth. ✨",
    "The orb's crystal clarity reveals no deception. Your words are bathed in truth. 🌟",
    "The orb hums with harmonic energy. Your statement carries the unmistakable signature of truth. 🔆",
];

const IMPOSSIBLE_EXPLANATIONS: &[&str] = &[
    "The cosmic energies reject this claim as violating natural law. The patterns of reality cannot bend this far.",
    "The ancient wisdom within me finds no path where this statement aligns with truth. Some claims cannot transcend mortal limitations.",
    "My mystical senses detect a profound disharmony between your words and the fabric of reality. Such things cannot be.",
];

const UNLIKELY_EXPLANATIONS: &[&str] = &[
    "The threads of truth are stretched thin within your statement. I sense exaggeration obscuring the core reality.",
    "The mystical currents reveal distortions in your narrative. Elements of truth exist but are clouded by inaccuracy.",
    "The ethereal balance tilts toward skepticism. Your words contain seeds of truth wrapped in layers of improbability.",
];

const NEUTRAL_EXPLANATIONS: &[&str] = &[
    "Your statement exists in the realm between truth and untruth. The energies are mixed and unclear.",
    "The mystical signs are ambiguous, neither confirming nor denying your claim. The balance hangs in perfect tension.",
    "I sense equal measures of truth and uncertainty. Your statement dwells in the twilight between fact and fiction.",
];

const LIKELY_EXPLANATIONS: &[&str] = &[
    "The ethereal currents flow predominantly toward truth. Your statement aligns with probable reality.",
    "My mystical senses detect a harmony between your words and the patterns of truth. Authenticity is present.",
    "The ancient wisdom within me recognizes the ring of truth in your statement. The balance favors veracity.",
];

const TRUE_EXPLANATIONS: &[&str] = &[
    "The cosmic energies align perfectly with your statement. Rare is such clarity in the sea of human communication.",
    "My deepest mystical senses confirm the profound truth in your words. The resonance is unmistakable.",
    "The ancient patterns of truth shine brightly through your statement. Such alignment with reality cannot be mistaken.",
];

/// Overrides the pools when a living speaker claims to be dead
pub const PARADOX_VERDICT: &str =
    "The orb trembles with paradox. A dead person cannot speak these words. ⚡";
pub const PARADOX_EXPLANATION: &str =
    "Your statement creates a mystical contradiction. The living energy flowing through you contradicts your claim of death.";

/// Used when the evaluation path itself fails
pub const NEUTRAL_DEFAULT_VERDICT: &str =
    "The orb's energies swirl in confusion. I cannot determine the full truth of your statement at this time. ✨";
pub const NEUTRAL_DEFAULT_EXPLANATION: &str =
    "The cosmic energies are in flux, making clear readings difficult. Your statement exists in a realm of uncertainty.";

pub const WELCOME: &str =
    "I am the Mystical Lie Detector Orb. Speak your statement, and I shall reveal the truth within. ✨";
pub const CAPTURE_APOLOGY: &str = "I couldn't hear you clearly. Please try again.";
pub const CAPTURE_START_FAILED: &str =
    "There was an error starting the speech recognition. Please try again.";
pub const CAPTURE_UNSUPPORTED: &str =
    "Speech recognition is not supported on this device.";
pub const AUTO_LOOP_ON: &str =
    "Auto-listening mode activated. I will listen after each response.";
pub const AUTO_LOOP_OFF: &str = "Auto-listening mode deactivated.";

pub fn verdicts(category: TruthCategory) -> &'static [&'static str] {
    match category {
        TruthCategory::Impossible => IMPOSSIBLE_VERDICTS,
        TruthCategory::Unlikely => UNLIKELY_VERDICTS,
        TruthCategory::Neutral => NEUTRAL_VERDICTS,
        TruthCategory::Likely => LIKELY_VERDICTS,
        TruthCategory::TrueLike => TRUE_VERDICTS,
    }
}

pub fn explanations(category: TruthCategory) -> &'static [&'static str] {
    match category {
        TruthCategory::Impossible => IMPOSSIBLE_EXPLANATIONS,
        TruthCategory::Unlikely => UNLIKELY_EXPLANATIONS,
        TruthCategory::Neutral => NEUTRAL_EXPLANATIONS,
        TruthCategory::Likely => LIKELY_EXPLANATIONS,
        TruthCategory::TrueLike => TRUE_EXPLANATIONS,
    }
}

/// One verdict and one explanation for `category`, each chosen uniformly
pub fn pick<R: Rng + ?Sized>(category: TruthCategory, rng: &mut R) -> (&'static str, &'static str) {
    // Pools are non-empty constants
    let verdict = verdicts(category).choose(rng).copied().unwrap_or(NEUTRAL_DEFAULT_VERDICT);
    let explanation = explanations(category)
        .choose(rng)
        .copied()
        .unwrap_or(NEUTRAL_DEFAULT_EXPLANATION);
    (verdict, explanation)
}
