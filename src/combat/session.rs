//! One fight between the player and a single enemy
//!
//! The session owns the enemy and borrows the player for the length of the
//! fight. Shield and stun are single-use flags that live only here.

use crate::core::dice::RandomSource;
use crate::core::events::{EventLog, GameEvent, ItemEffect};
use crate::entity::enemy::Enemy;
use crate::entity::items::ItemKind;
use crate::entity::player::Player;
use crate::risk::odds;

/// Damage left after armor: `max(0, raw - defense)`
pub fn mitigate(raw: i32, defense: i32) -> i32 {
    (raw - defense.max(0)).max(0)
}

/// What happened on the enemy's turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyTurn {
    /// Stunned, turn skipped
    Skipped,
    /// Shield ate the whole attack
    Absorbed { raw: i32 },
    Hit { raw: i32, dealt: i32 },
}

pub struct CombatSession<'a> {
    pub player: &'a mut Player,
    pub enemy: Enemy,
    pub shield_active: bool,
    pub enemy_stunned: bool,
}

impl<'a> CombatSession<'a> {
    pub fn new(player: &'a mut Player, enemy: Enemy) -> Self {
        Self {
            player,
            enemy,
            shield_active: false,
            enemy_stunned: false,
        }
    }

    /// Hit the enemy for base damage plus weapon damage. Returns damage dealt.
    pub fn player_attack(&mut self, events: &mut EventLog) -> i32 {
        let damage = self.player.total_damage();
        self.enemy.take_damage(damage);
        events.push(GameEvent::PlayerAttacked {
            enemy: self.enemy.name.clone(),
            damage,
            enemy_hp: self.enemy.hp,
        });
        damage
    }

    /// Run an item's effect against this fight
    pub fn apply_item(&mut self, kind: ItemKind, rng: &mut dyn RandomSource) -> ItemEffect {
        match kind {
            ItemKind::Medkit => ItemEffect::Healed(self.player.heal(ItemKind::MEDKIT_HEAL)),
            ItemKind::Shield => {
                self.shield_active = true;
                ItemEffect::ShieldRaised
            }
            ItemKind::Grenade => {
                let damage = rng.range_inclusive(
                    ItemKind::GRENADE_MIN as i64,
                    ItemKind::GRENADE_MAX as i64,
                ) as i32;
                self.enemy.take_damage(damage);
                ItemEffect::Exploded(damage)
            }
            ItemKind::StunCharge => {
                self.enemy_stunned = true;
                ItemEffect::Stunned
            }
        }
    }

    /// Use the item at `index` and remove it from the kit.
    /// `None` if there is no such item.
    pub fn use_item(
        &mut self,
        index: usize,
        rng: &mut dyn RandomSource,
        events: &mut EventLog,
    ) -> Option<ItemEffect> {
        let kind = self.player.items.get(index)?.kind;
        let effect = self.apply_item(kind, rng);
        let item = self.player.items.remove(index);
        events.push(GameEvent::ItemUsed {
            item: item.name,
            effect,
        });
        Some(effect)
    }

    /// Roll to break off the fight
    pub fn attempt_escape(
        &mut self,
        speed: u32,
        rng: &mut dyn RandomSource,
        events: &mut EventLog,
    ) -> bool {
        let chance = odds::combat_escape_chance(speed);
        let success = rng.chance(chance);
        events.push(GameEvent::EscapeAttempted { chance, success });
        success
    }

    /// Absorb or mitigate a raw hit. Returns damage applied to the player.
    pub fn receive_hit(&mut self, raw: i32) -> i32 {
        if self.shield_active {
            self.shield_active = false;
            return 0;
        }
        let dealt = mitigate(raw, self.player.armor_defense());
        self.player.take_damage(dealt);
        dealt
    }

    pub fn enemy_turn(&mut self, rng: &mut dyn RandomSource, events: &mut EventLog) -> EnemyTurn {
        let name = self.enemy.name.clone();
        if self.enemy_stunned {
            self.enemy_stunned = false;
            events.push(GameEvent::EnemyStunned { enemy: name });
            return EnemyTurn::Skipped;
        }

        let raw = self.enemy.attack(rng);
        if self.shield_active {
            self.receive_hit(raw);
            events.push(GameEvent::ShieldAbsorbed { enemy: name, raw });
            return EnemyTurn::Absorbed { raw };
        }

        let dealt = self.receive_hit(raw);
        events.push(GameEvent::EnemyAttacked {
            enemy: name,
            raw,
            dealt,
            player_hp: self.player.hp,
        });
        EnemyTurn::Hit { raw, dealt }
    }
}
