//! Fakes and fixtures shared by engine tests.

use std::sync::{Arc, Mutex};

use fame_rules::{
    DescriptionRef, FameRules, FameSettings, LevelTable, LevelThreshold, PlayerFameSet, PlayerId,
    ZoneCategory, MAX_LEVEL,
};

use super::FameEngine;
use crate::ports::{FameNotifier, ZoneContext};
use crate::store::InMemoryFameStore;

/// Threshold used for every level in test settings.
pub const THRESHOLD: i64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Snapshot(PlayerFameSet),
    LevelUp(DescriptionRef, i32),
    ExpGained(i32),
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn snapshots(&self) -> usize {
        self.notices()
            .iter()
            .filter(|n| matches!(n, Notice::Snapshot(_)))
            .count()
    }

    pub fn clear(&self) {
        self.notices.lock().unwrap().clear();
    }
}

impl FameNotifier for RecordingNotifier {
    fn send_snapshot(&self, _player_id: PlayerId, fame: &PlayerFameSet) {
        self.notices.lock().unwrap().push(Notice::Snapshot(fame.clone()));
    }

    fn send_level_up(&self, _player_id: PlayerId, description: DescriptionRef, new_level: i32) {
        self.notices
            .lock()
            .unwrap()
            .push(Notice::LevelUp(description, new_level));
    }

    fn send_exp_gained(&self, _player_id: PlayerId, level: i32) {
        self.notices.lock().unwrap().push(Notice::ExpGained(level));
    }
}

/// Places every player in the same zone.
pub struct FixedZone(pub Option<ZoneCategory>);

impl ZoneContext for FixedZone {
    fn current_zone_category(&self, _player_id: PlayerId) -> Option<ZoneCategory> {
        self.0
    }
}

pub fn category(id: u8) -> ZoneCategory {
    ZoneCategory::new(id).unwrap()
}

pub fn flat_settings(rules: FameRules) -> FameSettings {
    let table = LevelTable::new(
        (1..=MAX_LEVEL).map(|level| LevelThreshold {
            level,
            exp: THRESHOLD,
        }),
    )
    .unwrap();
    FameSettings::new(rules, table).unwrap()
}

pub struct Harness {
    pub engine: FameEngine,
    pub store: Arc<InMemoryFameStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub player: PlayerId,
}

impl Harness {
    pub fn new(zone: Option<u8>, settings: FameSettings) -> Self {
        let store = Arc::new(InMemoryFameStore::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let zones = Arc::new(FixedZone(zone.map(category)));
        let engine = FameEngine::new(settings, store.clone(), notifier.clone(), zones);

        Self {
            engine,
            store,
            notifier,
            player: PlayerId::new(),
        }
    }

    /// Log the player in and forget the notifications it produced.
    pub fn login(&self) -> PlayerFameSet {
        let fame = self.engine.login(self.player).unwrap();
        self.notifier.clear();
        fame
    }
}
