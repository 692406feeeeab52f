use glam::Vec2;
use proptest::prelude::*;

use crate::bus::{EventBus, TopicSet, MAX_INBOX_LEN};
use crate::commands::PlayerCommand;
use crate::config::{ConfigError, MatchConfig, UnitProfile};
use crate::damage::{DamageOutcome, Damageable, Hit};
use crate::enums::{DegradationLevel, MatchPhase, UnitKind};
use crate::events::{CombatEvent, FxEvent, Topic};
use crate::health::Health;
use crate::types::{heading_between, Aabb, Cooldown, EngagementRegion, SimClock};
use crate::units::{EnemyTank, PlayerTank, Scenery};

fn hit(amount: f32) -> Hit {
    Hit {
        amount,
        source: Vec2::ZERO,
    }
}

fn death_events(bus: &mut EventBus) -> usize {
    bus.take_published()
        .iter()
        .filter(|e| {
            matches!(
                e,
                CombatEvent::UnitDestroyed { .. }
                    | CombatEvent::PlayerDestroyed
                    | CombatEvent::SceneryDestroyed { .. }
            )
        })
        .count()
}

// ---- Degradation ----

#[test]
fn test_degradation_band_edges() {
    assert_eq!(DegradationLevel::from_ratio(1.0), DegradationLevel::Healthy);
    assert_eq!(DegradationLevel::from_ratio(0.7), DegradationLevel::Healthy);
    assert_eq!(DegradationLevel::from_ratio(0.6999), DegradationLevel::Damaged);
    assert_eq!(DegradationLevel::from_ratio(0.4), DegradationLevel::Damaged);
    assert_eq!(DegradationLevel::from_ratio(0.3999), DegradationLevel::Critical);
    assert_eq!(DegradationLevel::from_ratio(0.0), DegradationLevel::Critical);
}

#[test]
fn test_degradation_fx_on_band_change_only() {
    let mut bus = EventBus::new();
    let mut unit = EnemyTank::from_profile(UnitKind::Huge, &UnitProfile::for_kind(UnitKind::Huge));

    // 2.0 -> 1.9: still healthy
    unit.apply_damage(hit(0.1), Vec2::ZERO, &mut bus);
    // 1.9 -> 1.0: damaged
    unit.apply_damage(hit(0.9), Vec2::ZERO, &mut bus);
    // 1.0 -> 0.5: critical
    unit.apply_damage(hit(0.5), Vec2::ZERO, &mut bus);

    let levels: Vec<DegradationLevel> = bus
        .take_fx()
        .into_iter()
        .filter_map(|fx| match fx {
            FxEvent::Degraded { level, .. } => Some(level),
            _ => None,
        })
        .collect();
    assert_eq!(
        levels,
        vec![DegradationLevel::Damaged, DegradationLevel::Critical]
    );
    assert!(unit.is_alive());
}

// ---- Damageable ----

#[test]
fn test_idempotent_death() {
    let mut bus = EventBus::new();
    let mut unit = EnemyTank::from_profile(UnitKind::Standard, &UnitProfile::default());

    assert_eq!(
        unit.apply_damage(hit(1.0), Vec2::new(5.0, 5.0), &mut bus),
        DamageOutcome::Killed
    );
    assert_eq!(
        unit.apply_damage(hit(1.0), Vec2::new(5.0, 5.0), &mut bus),
        DamageOutcome::Ignored
    );
    assert_eq!(death_events(&mut bus), 1);
    assert_eq!(unit.health.current(), 0.0);
}

#[test]
fn test_unit_death_event_carries_reward_and_position() {
    let mut bus = EventBus::new();
    let mut unit = EnemyTank::from_profile(UnitKind::BigDamage, &UnitProfile::for_kind(UnitKind::BigDamage));
    unit.apply_damage(hit(3.0), Vec2::new(10.0, 20.0), &mut bus);

    assert_eq!(
        bus.take_published(),
        vec![CombatEvent::UnitDestroyed {
            position: Vec2::new(10.0, 20.0),
            reward: 150,
        }]
    );
}

#[test]
fn test_shield_suppresses_damage() {
    let mut bus = EventBus::new();
    let mut player = PlayerTank::new(2.0);
    player.grant_shield();

    assert_eq!(
        player.apply_damage(hit(5.0), Vec2::ZERO, &mut bus),
        DamageOutcome::Ignored
    );
    assert_eq!(player.health.current(), 2.0);
    assert!(bus.take_fx().is_empty());
    assert!(bus.take_published().is_empty());
}

#[test]
fn test_stale_shield_expiry_is_ignored() {
    let mut player = PlayerTank::new(2.0);
    let first = player.grant_shield();
    let second = player.grant_shield();

    assert!(!player.expire_shield(first));
    assert!(player.shielded);
    assert!(player.expire_shield(second));
    assert!(!player.shielded);
}

#[test]
fn test_player_death_publishes_player_destroyed() {
    let mut bus = EventBus::new();
    let mut player = PlayerTank::new(2.0);
    player.apply_damage(hit(2.0), Vec2::ZERO, &mut bus);

    assert!(!player.is_alive());
    assert_eq!(bus.take_published(), vec![CombatEvent::PlayerDestroyed]);
    assert_eq!(player.regenerate(1.0), None);
    assert!(!player.is_alive());
}

#[test]
fn test_regeneration_clamps_to_max() {
    let mut bus = EventBus::new();
    let mut player = PlayerTank::new(2.0);
    player.apply_damage(hit(1.5), Vec2::ZERO, &mut bus);
    assert_eq!(player.health.level(), DegradationLevel::Critical);

    player.regenerate(0.2);
    assert!((player.health.current() - 0.7).abs() < 1e-6);
    player.regenerate(5.0);
    assert_eq!(player.health.current(), 2.0);
    assert_eq!(player.health.level(), DegradationLevel::Healthy);
}

#[test]
fn test_scenery_destroyed_event() {
    let mut bus = EventBus::new();
    let mut crate_ = Scenery::new(0.2);
    crate_.apply_damage(hit(0.05), Vec2::ONE, &mut bus);
    assert!(crate_.is_alive());
    crate_.apply_damage(hit(0.5), Vec2::ONE, &mut bus);

    assert_eq!(
        bus.take_published(),
        vec![CombatEvent::SceneryDestroyed { position: Vec2::ONE }]
    );
}

proptest! {
    #[test]
    fn prop_health_stays_in_bounds(
        max in 0.01f32..100.0,
        hits in prop::collection::vec(-10.0f32..50.0, 0..40),
    ) {
        let mut health = Health::new(max);
        for amount in hits {
            health.take(amount);
            prop_assert!(health.current() >= 0.0);
            prop_assert!(health.current() <= health.max());
        }
    }

    #[test]
    fn prop_exactly_one_death_event(hits in prop::collection::vec(0.0f32..0.6, 1..60)) {
        let mut bus = EventBus::new();
        let mut unit = EnemyTank::from_profile(UnitKind::Standard, &UnitProfile::default());
        for amount in &hits {
            unit.apply_damage(hit(*amount), Vec2::ZERO, &mut bus);
        }
        let total: f32 = hits.iter().sum();
        let deaths = death_events(&mut bus);
        if unit.is_alive() {
            prop_assert_eq!(deaths, 0);
        } else {
            prop_assert_eq!(deaths, 1);
            prop_assert!(total >= 1.0 - 1e-3);
        }
    }
}

// ---- Event bus ----

#[test]
fn test_bus_fans_out_by_topic() {
    let mut bus = EventBus::new();
    let scores = bus.subscribe(TopicSet::of(&[Topic::ScoreDelta]));
    let everything = bus.subscribe(TopicSet::all());

    assert_eq!(bus.publish(CombatEvent::ScoreDelta { amount: -1 }), 2);
    assert_eq!(bus.publish(CombatEvent::PlayerDestroyed), 1);

    assert_eq!(bus.drain(scores), vec![CombatEvent::ScoreDelta { amount: -1 }]);
    assert_eq!(bus.pending(everything), 2);
    assert_eq!(bus.drain(everything).len(), 2);
    assert_eq!(bus.pending(everything), 0);
}

#[test]
fn test_bus_unsubscribe_stops_delivery() {
    let mut bus = EventBus::new();
    let id = bus.subscribe(TopicSet::all());
    assert!(bus.unsubscribe(id));
    assert!(!bus.unsubscribe(id));

    assert_eq!(bus.publish(CombatEvent::AllyDestroyed), 0);
    assert!(bus.drain(id).is_empty());
    // Still recorded for the tick log.
    assert_eq!(bus.take_published().len(), 1);
}

#[test]
fn test_bus_inbox_is_bounded() {
    let mut bus = EventBus::new();
    let idle = bus.subscribe(TopicSet::of(&[Topic::ScoreDelta]));
    let total = MAX_INBOX_LEN as i64 + 10;
    for amount in 0..total {
        bus.publish(CombatEvent::ScoreDelta { amount });
    }

    assert_eq!(bus.pending(idle), MAX_INBOX_LEN);
    assert_eq!(bus.dropped(idle), 10);
    let inbox = bus.drain(idle);
    // Oldest events go first; the newest survive in order.
    assert_eq!(inbox.first(), Some(&CombatEvent::ScoreDelta { amount: 10 }));
    assert_eq!(inbox.last(), Some(&CombatEvent::ScoreDelta { amount: total - 1 }));

    bus.publish(CombatEvent::ScoreDelta { amount: 0 });
    assert_eq!(bus.pending(idle), 1);
    assert_eq!(bus.dropped(idle), 10);
}

#[test]
fn test_every_event_maps_to_its_topic() {
    let events = [
        CombatEvent::UnitDestroyed { position: Vec2::ZERO, reward: 1 },
        CombatEvent::PlayerDestroyed,
        CombatEvent::ScoreDelta { amount: 1 },
        CombatEvent::AllyDestroyed,
        CombatEvent::Explosion { position: Vec2::ZERO, radius: 1.0, damage: 1.0 },
        CombatEvent::PauseRequested,
        CombatEvent::SoundSettingChanged { enabled: true },
        CombatEvent::SceneryDestroyed { position: Vec2::ZERO },
    ];
    let topics: Vec<Topic> = events.iter().map(CombatEvent::topic).collect();
    assert_eq!(topics, Topic::ALL.to_vec());
}

// ---- Types ----

#[test]
fn test_clock_scales_time() {
    let mut clock = SimClock::default();
    assert_eq!(clock.advance(100.0), 100.0);
    clock.time_scale = 0.1;
    let dt = clock.advance(100.0);
    assert!((dt - 10.0).abs() < 1e-9);
    assert!((clock.now_ms - 110.0).abs() < 1e-9);
    assert_eq!(clock.tick, 2);
}

#[test]
fn test_heading_between() {
    let h = heading_between(Vec2::ZERO, Vec2::new(0.0, 10.0)).unwrap();
    assert!((h - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    assert_eq!(heading_between(Vec2::ONE, Vec2::ONE), None);
    assert_eq!(heading_between(Vec2::ZERO, Vec2::new(f32::NAN, 1.0)), None);
}

#[test]
fn test_aabb_circle_overlap_is_inclusive() {
    let b = Aabb::new(Vec2::new(10.0, 10.0), Vec2::ZERO);
    assert_eq!(b.min, Vec2::ZERO);
    assert!(b.overlaps_circle(Vec2::new(15.0, 5.0), 5.0));
    assert!(!b.overlaps_circle(Vec2::new(15.1, 5.0), 5.0));
    assert!(b.contains(Vec2::new(10.0, 10.0)));
}

#[test]
fn test_engagement_region() {
    let area = EngagementRegion::Area {
        bounds: Aabb::from_size(100.0, 100.0),
    };
    assert!(area.contains(Vec2::new(50.0, 50.0)));
    assert!(!area.contains(Vec2::new(150.0, 50.0)));
    assert!(EngagementRegion::Everywhere.contains(Vec2::splat(1e6)));
    assert!(!EngagementRegion::Nowhere.contains(Vec2::ZERO));
}

#[test]
fn test_cooldown_ready_at_boundary() {
    let mut cd = Cooldown::default();
    assert!(cd.ready(0.0));
    cd.arm(0.0, 80.0);
    assert!(!cd.ready(79.9));
    assert!(cd.ready(80.0));
}

// ---- Serde ----

#[test]
fn test_combat_event_serde_tagged() {
    let event = CombatEvent::ScoreDelta { amount: -10 };
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("\"type\":\"ScoreDelta\""));
    let back: CombatEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
}

#[test]
fn test_player_command_deserialize() {
    let cmd: PlayerCommand = serde_json::from_str(r#"{"type":"SetTimeScale","scale":0.5}"#).unwrap();
    assert_eq!(cmd, PlayerCommand::SetTimeScale { scale: 0.5 });
}

#[test]
fn test_match_phase_default() {
    assert_eq!(MatchPhase::default(), MatchPhase::Playing);
    assert!(MatchPhase::Victory.is_terminal());
    assert!(MatchPhase::Defeat.is_terminal());
}

// ---- Config ----

#[test]
fn test_config_partial_json_uses_defaults() {
    let config = MatchConfig::from_json_str(
        r#"{ "random_crates": 3, "rules": { "victory_bonus": 500 } }"#,
    )
    .unwrap();
    assert_eq!(config.random_crates, 3);
    assert_eq!(config.rules.victory_bonus, 500);
    assert_eq!(config.rules.reward_delay_ms, 1000.0);
    assert_eq!(config.weapons.enemy_cannon.capacity, 5);
    assert_eq!(config.units.get(UnitKind::Huge).reward, 200);
}

#[test]
fn test_config_rejects_zero_capacity() {
    let mut config = MatchConfig::default();
    config.weapons.player_bomb.capacity = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidCapacity { weapon: "player_bomb", .. })
    ));
}

#[test]
fn test_config_rejects_bad_health_and_arena() {
    let mut config = MatchConfig::default();
    config.player_max_health = 0.0;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidHealth { .. })));

    let mut config = MatchConfig::default();
    config.arena_width = -1.0;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidArena { .. })));
}

#[test]
fn test_config_rejects_out_of_range_rules() {
    let mut config = MatchConfig::default();
    config.rules.shield_duration_ms = 0.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { what: "shield_duration_ms", .. })
    ));

    let mut config = MatchConfig::default();
    config.rules.regen_amount = -0.5;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { what: "regen_amount", .. })
    ));

    for scale in [0.0, -0.1, 1.5, f64::NAN] {
        let mut config = MatchConfig::default();
        config.rules.slow_motion_scale = scale;
        assert!(
            matches!(
                config.validate(),
                Err(ConfigError::InvalidValue { what: "slow_motion_scale", .. })
            ),
            "scale {scale} accepted"
        );
    }

    let mut config = MatchConfig::default();
    config.rules.victory_remaining_units =
        config.enemy_spawns.len() as u32 + config.random_enemies;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { what: "victory_remaining_units", .. })
    ));

    // No starting roster: units are spawned by the host, so any threshold goes.
    let mut config = MatchConfig::empty();
    config.rules.victory_remaining_units = 5;
    config.rules.regen_amount = 0.0;
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_parse_error() {
    assert!(matches!(
        MatchConfig::from_json_str("{ not json"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        MatchConfig::from_path("/definitely/not/here.json"),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_default_config_is_valid() {
    assert!(MatchConfig::default().validate().is_ok());
    assert!(MatchConfig::empty().validate().is_ok());
}
