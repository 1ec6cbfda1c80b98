//! Turn orchestration with the generator in the loop.
//!
//! The core pipeline is synchronous and already installs a selector-chosen
//! next scenario. The director wraps it: after each turn it asks the
//! generator for a richer scene and, when the adapter passes it, swaps it
//! in before the player sees anything. Every generator failure is silent —
//! the player gets the selector's scene, never an error.

use rand::Rng;
use tracing::debug;

use soulbound_core::catalog::ScenarioCatalog;
use soulbound_core::character::Character;
use soulbound_core::config::GameConfig;
use soulbound_core::pipeline::{process_choice, TurnOutcome};
use soulbound_core::scenario::{Choice, Scenario};
use soulbound_core::selector::select_scenario;
use soulbound_core::state::GameData;
use soulbound_core::AchievementCatalog;

use crate::adapter::sanitize_scenario;
use crate::client::GenClient;
use crate::prompt::scenario_prompts;
use crate::types::GenRequest;

/// Owns the catalogs, configuration, and generator client for one host.
///
/// Safe to share read-only across sessions; all per-session state lives in
/// the `Character`/`GameData` the caller passes in.
pub struct Director {
    scenarios: ScenarioCatalog,
    achievements: AchievementCatalog,
    config: GameConfig,
    client: GenClient,
}

impl Director {
    /// Create a director with the built-in catalogs.
    #[must_use]
    pub fn new(config: GameConfig, client: GenClient) -> Self {
        Self {
            scenarios: ScenarioCatalog::builtin(),
            achievements: AchievementCatalog::builtin(),
            config,
            client,
        }
    }

    /// A director that never calls out; pure selector play.
    #[must_use]
    pub fn offline(config: GameConfig) -> Self {
        Self::new(config, GenClient::none())
    }

    /// The opening scenario for a fresh session.
    pub async fn opening_scenario<R: Rng>(
        &self,
        character: &Character,
        game: &GameData,
        rng: &mut R,
    ) -> Scenario {
        self.next_scenario(character, game, rng).await
    }

    /// Process one choice and return the new state, with the next scenario
    /// already installed. The session must not accept another choice until
    /// this future resolves.
    pub async fn play_turn<R: Rng>(
        &self,
        character: &Character,
        game: &GameData,
        choice: &Choice,
        scenario: &Scenario,
        rng: &mut R,
    ) -> TurnOutcome {
        let mut out = process_choice(
            &self.scenarios,
            &self.achievements,
            &self.config,
            character,
            game,
            choice,
            scenario,
            rng,
        );

        // The pipeline installed a selector scene; try to trade up.
        if self.client.is_available() {
            if let Some(generated) = self
                .generated_scenario(&out.character, &out.game, rng)
                .await
            {
                debug!(id = %generated.id, "using generated scenario");
                out.game.current_scenario = Some(generated);
            }
        }
        out
    }

    /// Prefer a generated scenario, fall back to the selector.
    async fn next_scenario<R: Rng>(
        &self,
        character: &Character,
        game: &GameData,
        rng: &mut R,
    ) -> Scenario {
        if self.client.is_available() {
            if let Some(generated) = self.generated_scenario(character, game, rng).await {
                return generated;
            }
        }
        select_scenario(&self.scenarios, &self.config, character, game, rng)
    }

    /// One generator round trip through the adapter. Any failure, from the
    /// network up to malformed content, collapses to `None`.
    async fn generated_scenario<R: Rng>(
        &self,
        character: &Character,
        game: &GameData,
        rng: &mut R,
    ) -> Option<Scenario> {
        let (system, user) = scenario_prompts(character, game);
        let request = GenRequest::scenario(system, user);
        match self.client.generate(&request).await {
            Ok(response) => sanitize_scenario(&response.text, &self.config.generator, game, rng),
            Err(e) => {
                debug!("generator unavailable, using selector: {e}");
                None
            }
        }
    }
}
