//! War rules.

use crate::actions::{Action, ActionController, ActionGroup, ActionSpec};
use crate::core::{EntityId, PlayerId, Term};
use crate::log::join_terms;
use crate::rules::{
    Game, GameError, GameInfo, GameOutcome, GameResult, GameSettings, PlayerActions, TurnContext,
};
use crate::state::{GameState, ObjectType, TList, TMap, Value, Visibility};

const CARD: &str = "card";
const LIFE: &str = "life";
const DECKS: &str = "decks";
const HANDS: &str = "hands";
const DISCARD: &str = "discard";
const ACTIVE: &str = "active";
const TURN: &str = "turn";

/// The War rules collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct War {
    life: i64,
    deck_size: usize,
    hand_size: usize,
    seed: u64,
}

impl Default for War {
    fn default() -> Self {
        Self {
            life: 20,
            deck_size: 10,
            hand_size: 3,
            seed: 0,
        }
    }
}

impl War {
    /// Registry entry: "war", 2 to 8 players.
    #[must_use]
    pub fn info() -> GameInfo {
        GameInfo::new("war", 2..=8, |settings| {
            War::from_settings(settings).map(|war| Box::new(war) as Box<dyn Game>)
        })
    }

    /// Read `life`, `deck_size`, `hand_size` and `seed`.
    ///
    /// # Errors
    ///
    /// `GameError::InvalidSetting` for non-integers and out-of-range values.
    pub fn from_settings(settings: &GameSettings) -> Result<Self, GameError> {
        let defaults = War::default();
        let life = settings.int_or("life", defaults.life)?;
        if life <= 0 {
            return Err(invalid_setting("life", "must be positive"));
        }
        Ok(Self {
            life,
            deck_size: non_negative(settings, "deck_size", defaults.deck_size)?,
            hand_size: non_negative(settings, "hand_size", defaults.hand_size)?,
            seed: settings.int_or("seed", 0)? as u64,
        })
    }

    /// Life of `player`, 0 if unknown.
    #[must_use]
    pub fn life(state: &GameState, player: PlayerId) -> i64 {
        state
            .get(LIFE)
            .and_then(|lives| lives.get(&key(player)))
            .and_then(Value::as_int)
            .unwrap_or(0)
    }

    /// Cards in `player`'s hand, oldest first.
    #[must_use]
    pub fn hand(state: &GameState, player: PlayerId) -> Vec<EntityId> {
        cards(state, HANDS, player)
    }

    /// Cards left in `player`'s deck, bottom first.
    #[must_use]
    pub fn deck(state: &GameState, player: PlayerId) -> Vec<EntityId> {
        cards(state, DECKS, player)
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn active(state: &GameState) -> Option<PlayerId> {
        state
            .get(ACTIVE)
            .and_then(Value::as_term)
            .and_then(Term::as_player)
    }

    /// Players with life left, in seat order.
    #[must_use]
    pub fn alive(state: &GameState, players: &[PlayerId]) -> Vec<PlayerId> {
        players
            .iter()
            .copied()
            .filter(|&p| War::life(state, p) > 0)
            .collect()
    }

    fn deal(&self, state: &mut GameState, players: &[PlayerId]) -> Result<(), GameError> {
        let mut lives = TMap::new();
        let mut decks = TMap::new();
        let mut hands = TMap::new();

        for &player in players {
            let mut powers: Vec<i64> = (0..self.deck_size).map(|i| (i % 5) as i64 + 1).collect();
            if let Some(rng) = state.rng_mut() {
                rng.shuffle(&mut powers);
            }

            let mut deck = TList::new();
            for power in powers {
                let id = state.entities_mut().create(
                    CARD,
                    [("power", Value::from(power)), ("owner", Value::from(player))],
                    Visibility::Players(Default::default()),
                    None,
                )?;
                deck.push(Value::from(id));
            }
            lives.insert(key(player), Value::from(self.life));
            decks.insert(key(player), Value::List(deck));
            hands.insert(key(player), Value::list());
        }

        state.set(LIFE, lives);
        state.set(DECKS, decks);
        state.set(HANDS, hands);
        state.set(DISCARD, Value::list());
        Ok(())
    }

    fn next_turn(ctx: &mut TurnContext<'_>, after: PlayerId) -> Result<PlayerActions, GameError> {
        let alive = War::alive(ctx.state, ctx.players);
        if alive.len() <= 1 {
            return Ok(PlayerActions::new());
        }
        let next = alive
            .iter()
            .copied()
            .find(|&p| p > after)
            .unwrap_or(alive[0]);

        let turn = ctx.state.get(TURN).and_then(Value::as_int).unwrap_or(0) + 1;
        ctx.state.set(TURN, turn);
        ctx.state.set(ACTIVE, next);
        Ok(War::turn(ctx.state, ctx.players, next))
    }

    /// Actions `player` may take on their turn.
    fn turn(state: &GameState, players: &[PlayerId], player: PlayerId) -> PlayerActions {
        let mut controller = ActionController::new();

        if !War::deck(state, player).is_empty() {
            controller
                .push_group(ActionGroup::new("draw").with_desc("Draw a card"))
                .push(Action::new([Term::from("draw")]));
        }

        let hand = War::hand(state, player);
        let opponents: Vec<PlayerId> = War::alive(state, players)
            .into_iter()
            .filter(|&p| p != player)
            .collect();
        if !hand.is_empty() && !opponents.is_empty() {
            controller
                .push_group(ActionGroup::new("play").with_desc("Play a card against an opponent"))
                .extend(ActionSpec::tuple([
                    ActionSpec::from("play"),
                    ActionSpec::choice(hand),
                    ActionSpec::choice(opponents),
                ]));
        }

        controller
            .push_group(ActionGroup::new("pass").with_desc("End your turn"))
            .push(Action::new([Term::from("pass")]));

        PlayerActions::from([(player, controller)])
    }

    fn draw(ctx: &mut TurnContext<'_>, player: PlayerId) -> Result<(), GameError> {
        let card = pile_mut(ctx.state, DECKS, player)?
            .pop()
            .and_then(|v| v.as_term().and_then(Term::as_entity))
            .ok_or_else(|| GameError::invalid_action(player, "deck is empty"))?;

        if let Some(object) = ctx.state.entities_mut().get_mut(card) {
            object.visibility = Visibility::only(player);
        }
        pile_mut(ctx.state, HANDS, player)?.push(Value::from(card));

        ctx.log.write([Term::from(player), Term::from("draws a card")]);
        ctx.log.write_to([player], [Term::from("You drew"), Term::from(card)]);
        Ok(())
    }

    fn play(ctx: &mut TurnContext<'_>, player: PlayerId, action: &Action) -> Result<(), GameError> {
        let card = action.get(1).and_then(Term::as_entity);
        let target = action.get(2).and_then(Term::as_player);
        let (Some(card), Some(target)) = (card, target) else {
            return Err(GameError::invalid_action(player, "expected: play <card> <player>"));
        };
        if target == player || War::life(ctx.state, target) <= 0 {
            return Err(GameError::invalid_action(player, format!("{target} is not a valid target")));
        }

        let hand = pile_mut(ctx.state, HANDS, player)?;
        let position = hand
            .position(&Value::from(card))
            .ok_or_else(|| GameError::invalid_action(player, format!("{card} is not in hand")))?;
        hand.remove(position);

        let object = ctx
            .state
            .entities_mut()
            .get_mut(card)
            .ok_or_else(|| GameError::Rules(format!("unknown card {card}")))?;
        object.visibility = Visibility::All;
        let power = object.get_int("power").unwrap_or(0);

        if let Some(discard) = ctx.state.get_mut(DISCARD).and_then(Value::as_list_mut) {
            discard.push(Value::from(card));
        }
        let life = War::life(ctx.state, target) - power;
        if let Some(lives) = ctx.state.get_mut(LIFE).and_then(Value::as_map_mut) {
            lives.insert(key(target), Value::from(life));
        }

        ctx.log.writef(
            "{} plays {} for {} damage to {}",
            &[player.into(), card.into(), power.into(), target.into()],
        )?;
        if life <= 0 {
            ctx.log.write([Term::from(target), Term::from("is out")]);
        }
        Ok(())
    }
}

impl Game for War {
    fn begin_game(&mut self, ctx: &mut TurnContext<'_>) -> Result<PlayerActions, GameError> {
        if ctx.state.rng_mut().is_none() {
            ctx.state.seed_rng(self.seed);
        }
        ctx.state.entities_mut().register_type(
            ObjectType::new(CARD)
                .with_required(["power", "owner"])
                .with_public(["owner"]),
        )?;
        self.deal(ctx.state, ctx.players)?;

        for &player in ctx.players {
            for _ in 0..self.hand_size.min(self.deck_size) {
                War::draw(ctx, player)?;
            }
        }

        let first = ctx
            .players
            .first()
            .copied()
            .ok_or_else(|| GameError::Rules("no players".into()))?;
        ctx.state.set(TURN, 1i64);
        ctx.state.set(ACTIVE, first);
        ctx.log.writef(
            "{} players start with {} life",
            &[Term::Int(ctx.players.len() as i64), Term::Int(self.life)],
        )?;
        Ok(War::turn(ctx.state, ctx.players, first))
    }

    fn take_action(
        &mut self,
        ctx: &mut TurnContext<'_>,
        player: PlayerId,
        action: &Action,
    ) -> Result<PlayerActions, GameError> {
        if War::active(ctx.state) != Some(player) {
            return Err(GameError::invalid_action(player, "not your turn"));
        }
        match action.verb() {
            Some("draw") => War::draw(ctx, player)?,
            Some("play") => War::play(ctx, player, action)?,
            Some("pass") => ctx.log.write([Term::from(player), Term::from("passes")]),
            _ => return Err(GameError::invalid_action(player, format!("unknown action {action}"))),
        }
        War::next_turn(ctx, player)
    }

    fn end_game(&mut self, ctx: &mut TurnContext<'_>) -> Result<GameOutcome, GameError> {
        let alive = War::alive(ctx.state, ctx.players);
        let result = match alive.as_slice() {
            [winner] => {
                ctx.log.write([Term::from(*winner), Term::from("wins")]);
                GameResult::Winner(*winner)
            }
            _ => {
                let names: Vec<Term> = alive.iter().map(|&p| p.into()).collect();
                let mut entry = join_terms(&names, ", ", Some(" and "));
                entry.terms.push(Term::from(" share the game"));
                ctx.log.push(entry);
                GameResult::Draw
            }
        };
        let scores = ctx
            .players
            .iter()
            .map(|&p| (p, War::life(ctx.state, p).max(0)));
        Ok(GameOutcome::new(result).with_scores(scores))
    }

    /// Decks are shown as sizes only.
    fn get_observation(&self, state: &GameState, viewer: Option<PlayerId>) -> Value {
        let mut view = state.observe(viewer);
        let vars = view
            .as_map_mut()
            .and_then(|m| m.get_mut("state"))
            .and_then(Value::as_map_mut);
        if let Some(vars) = vars {
            if let Some(Value::Map(decks)) = vars.remove(DECKS) {
                let sizes: TMap<String, Value> = decks
                    .iter()
                    .map(|(seat, deck)| {
                        let size = deck.as_list().map_or(0, TList::len);
                        (seat.clone(), Value::from(size as i64))
                    })
                    .collect();
                vars.insert("deck_sizes".to_string(), Value::Map(sizes));
            }
        }
        view
    }
}

fn key(player: PlayerId) -> String {
    player.0.to_string()
}

fn cards(state: &GameState, pile: &str, player: PlayerId) -> Vec<EntityId> {
    state
        .get(pile)
        .and_then(|piles| piles.get(&key(player)))
        .and_then(Value::as_list)
        .map(|list| {
            list.iter()
                .filter_map(|v| v.as_term().and_then(Term::as_entity))
                .collect()
        })
        .unwrap_or_default()
}

fn pile_mut<'a>(
    state: &'a mut GameState,
    pile: &str,
    player: PlayerId,
) -> Result<&'a mut TList<Value>, GameError> {
    state
        .get_mut(pile)
        .and_then(Value::as_map_mut)
        .and_then(|piles| piles.get_mut(key(player).as_str()))
        .and_then(Value::as_list_mut)
        .ok_or_else(|| GameError::Rules(format!("{pile} missing for {player}")))
}

fn invalid_setting(key: &str, reason: &str) -> GameError {
    GameError::InvalidSetting {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn non_negative(settings: &GameSettings, key: &str, default: usize) -> Result<usize, GameError> {
    let value = settings.int_or(key, default as i64)?;
    usize::try_from(value).map_err(|_| invalid_setting(key, "must not be negative"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::GameLog;
    use crate::state::Transactional;

    fn setup(players: usize, settings: GameSettings) -> (War, GameState, GameLog, Vec<PlayerId>, PlayerActions) {
        let mut war = War::from_settings(&settings).unwrap();
        let mut state = GameState::with_seed(7);
        let mut log = GameLog::new();
        let seats: Vec<PlayerId> = PlayerId::all(players).collect();
        let first = {
            let mut ctx = TurnContext {
                state: &mut state,
                log: &mut log,
                settings: &settings,
                players: &seats,
            };
            war.begin_game(&mut ctx).unwrap()
        };
        (war, state, log, seats, first)
    }

    #[test]
    fn test_settings_validation() {
        assert!(War::from_settings(&GameSettings::new().with("life", 0i64)).is_err());
        assert!(War::from_settings(&GameSettings::new().with("deck_size", -1i64)).is_err());
        let war = War::from_settings(&GameSettings::new().with("hand_size", 2i64)).unwrap();
        assert_eq!(war.hand_size, 2);
    }

    #[test]
    fn test_begin_deals_hands() {
        let (_, state, _, seats, first) = setup(3, GameSettings::new());
        for &p in &seats {
            assert_eq!(War::hand(&state, p).len(), 3);
            assert_eq!(War::deck(&state, p).len(), 7);
            assert_eq!(War::life(&state, p), 20);
        }
        assert_eq!(War::active(&state), Some(PlayerId(0)));

        let controller = &first[&PlayerId(0)];
        let names: Vec<_> = controller.groups().iter().map(ActionGroup::name).collect();
        assert_eq!(names, vec!["draw", "play", "pass"]);
        // 3 cards against 2 opponents
        assert_eq!(controller.group("play").unwrap().len(), 6);
    }

    #[test]
    fn test_hand_is_private() {
        let (war, state, _, _, _) = setup(2, GameSettings::new());
        let card = War::hand(&state, PlayerId(0))[0];

        let find = |viewer| {
            let view = war.get_observation(&state, viewer);
            view.get("objects")
                .and_then(Value::as_list)
                .and_then(|objects| {
                    objects
                        .iter()
                        .find(|o| o.get("id").and_then(Value::as_term) == Some(&Term::Entity(card)))
                        .cloned()
                })
                .unwrap()
        };
        assert!(find(Some(PlayerId(0))).get("power").is_some());
        assert!(find(Some(PlayerId(1))).get("power").is_none());
        assert!(find(None).get("power").is_none());
    }

    #[test]
    fn test_observation_hides_decks() {
        let (war, state, _, _, _) = setup(2, GameSettings::new());
        let view = war.get_observation(&state, Some(PlayerId(0)));
        let vars = view.get("state").unwrap();
        assert!(vars.get(DECKS).is_none());
        assert_eq!(
            vars.get("deck_sizes").and_then(|s| s.get("0")).and_then(Value::as_int),
            Some(7)
        );
    }

    #[test]
    fn test_play_deals_damage_and_passes_turn() {
        let (mut war, mut state, mut log, seats, _) = setup(2, GameSettings::new());
        let card = War::hand(&state, PlayerId(0))[0];
        let power = state.entities().get(card).unwrap().get_int("power").unwrap();
        let action = Action::new([Term::from("play"), card.into(), PlayerId(1).into()]);

        let next = {
            let mut ctx = TurnContext {
                state: &mut state,
                log: &mut log,
                settings: &GameSettings::new(),
                players: &seats,
            };
            war.take_action(&mut ctx, PlayerId(0), &action).unwrap()
        };

        assert_eq!(War::life(&state, PlayerId(1)), 20 - power);
        assert_eq!(War::hand(&state, PlayerId(0)).len(), 2);
        assert_eq!(state.entities().get(card).unwrap().visibility, Visibility::All);
        assert!(next.contains_key(&PlayerId(1)));
        assert_eq!(War::active(&state), Some(PlayerId(1)));
    }

    #[test]
    fn test_wrong_player_rejected_and_rolled_back() {
        let (mut war, mut state, mut log, seats, _) = setup(2, GameSettings::new());
        let before = state.clone();
        state.begin();
        let result = {
            let mut ctx = TurnContext {
                state: &mut state,
                log: &mut log,
                settings: &GameSettings::new(),
                players: &seats,
            };
            war.take_action(&mut ctx, PlayerId(1), &Action::new([Term::from("pass")]))
        };
        assert_eq!(
            result,
            Err(GameError::invalid_action(PlayerId(1), "not your turn"))
        );
        state.abort();
        assert_eq!(state, before);
    }

    #[test]
    fn test_knockout_ends_game() {
        let settings = GameSettings::new().with("life", 1i64);
        let (mut war, mut state, mut log, seats, _) = setup(2, settings.clone());
        let card = War::hand(&state, PlayerId(0))[0];
        let action = Action::new([Term::from("play"), card.into(), PlayerId(1).into()]);

        let mut ctx = TurnContext {
            state: &mut state,
            log: &mut log,
            settings: &settings,
            players: &seats,
        };
        let next = war.take_action(&mut ctx, PlayerId(0), &action).unwrap();
        assert!(next.is_empty());

        let outcome = war.end_game(&mut ctx).unwrap();
        assert_eq!(outcome.result, GameResult::Winner(PlayerId(0)));
        assert_eq!(outcome.scores[&PlayerId(1)], 0);
    }
}
