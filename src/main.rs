//! Star Smuggler - Entry Point
//!
//! Console front end. Reads menu picks from stdin, renders the event log
//! after every call into the game session.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use star_smuggler::core::choice::{Chooser, Menu};
use star_smuggler::core::config::{load_config, GameConfig};
use star_smuggler::core::error::{Result, SmugglerError};
use star_smuggler::core::events::{GameEvent, ItemEffect};
use star_smuggler::entity::items::ItemKind;
use star_smuggler::game::{DayStart, GameSession};

#[derive(Parser, Debug)]
#[command(name = "star-smuggler")]
#[command(about = "Fly contraband across the sector without getting caught")]
struct Args {
    /// Game config (TOML). Defaults apply to anything left out.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Captain name
    #[arg(long)]
    name: Option<String>,
}

/// Answers menus from stdin, one-based
struct Console {
    closed: bool,
}

impl Console {
    fn read_line(&mut self) -> Option<String> {
        if self.closed {
            return None;
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => {
                self.closed = true;
                None
            }
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    /// Prompt until a number in `1..=count` is entered
    fn pick(&mut self, count: usize) -> usize {
        loop {
            print!("> ");
            let _ = io::stdout().flush();
            let Some(line) = self.read_line() else {
                return 0;
            };
            match line.parse::<usize>() {
                Ok(n) if (1..=count).contains(&n) => return n - 1,
                _ => println!("Enter a number from 1 to {count}."),
            }
        }
    }
}

impl Chooser for Console {
    fn choose(&mut self, menu: &Menu) -> usize {
        println!();
        println!("{}", prompt(menu));
        let labels = menu.labels();
        for (i, label) in labels.iter().enumerate() {
            println!("  {}) {}", i + 1, label);
        }
        self.pick(labels.len())
    }
}

fn prompt(menu: &Menu) -> String {
    match menu {
        Menu::CombatAction {
            enemy,
            enemy_hp,
            player_hp,
            max_hp,
            shield_active,
            ..
        } => {
            let shield = if *shield_active { " [shield up]" } else { "" };
            format!("{enemy}: {enemy_hp} HP | You: {player_hp}/{max_hp} HP{shield}")
        }
        Menu::CombatItem { .. } => "Use which item?".into(),
        Menu::TakeEquipment { offered, current } => match current {
            Some(c) => format!("Found {}. Swap out your {}?", offered.name(), c.name()),
            None => format!("Found {}.", offered.name()),
        },
        Menu::PolicePatrol { tier, enemy } => {
            format!("{} patrol hailing you: {enemy}.", tier.label())
        }
        Menu::Bribe { amount, credits } => {
            format!("They might look away for {amount} credits (you have {credits}).")
        }
        Menu::ContrabandFound { manifest } => {
            format!("They found contraband: {}.", manifest.join(", "))
        }
        Menu::CartelStandoff { threat, crew } => {
            format!("Cartel ambush (threat {threat}): {}.", crew.join(", "))
        }
        Menu::AsteroidField => "Asteroid field dead ahead.".into(),
        Menu::Planet => "A planet on the scanners.".into(),
        Menu::TractorBeam { source } => format!("Tractor beam lock from a {} ship!", source.label()),
        Menu::Boarded { source } => format!("{} boarders are coming through the airlock.", source.label()),
        Menu::HoldFull => "The hold is too full to hide in.".into(),
        Menu::CaughtHiding => "They found your hiding spot.".into(),
        Menu::HangarOpportunity => "They left. Their hangar is unguarded.".into(),
        Menu::ReleasedClean => "Search came up clean. You're free to go.".into(),
        Menu::PrisonCell => "You're in a cell.".into(),
        Menu::Corridor { explored, total } => {
            format!("Corridor {} of {total}.", explored + 1)
        }
        Menu::TakeStone { stone } => format!("The {} Stone is right there.", stone.name()),
        Menu::ArmoryLock => "A locked armory door.".into(),
        Menu::ArmoryCache { weapon, armor } => {
            format!("Armory cache: {} or {}.", weapon.name, armor.name)
        }
        Menu::Reactor => "The reactor core hums.".into(),
        Menu::ContractArrival { reward, stones } => {
            if stones.is_empty() {
                format!("Destination reached. Payout: {reward} credits.")
            } else {
                let names: Vec<&str> = stones.iter().map(|s| s.name()).collect();
                format!(
                    "Destination reached. Payout: {reward} credits. The cargo holds: {}.",
                    names.join(", ")
                )
            }
        }
        Menu::KingpinOffer { credits } => {
            format!("{credits} credits. You could walk away a kingpin.")
        }
        Menu::StonesDestiny => "All six stones hum in your hold.".into(),
    }
}

fn render(event: &GameEvent) -> Option<String> {
    let text = match event {
        GameEvent::CombatStarted { enemy, hp } => format!("Combat with {enemy} ({hp} HP)."),
        GameEvent::PlayerAttacked {
            enemy,
            damage,
            enemy_hp,
        } => format!("You hit {enemy} for {damage}. ({enemy_hp} HP left)"),
        GameEvent::ItemUsed { item, effect } => match effect {
            ItemEffect::Healed(hp) => format!("{item}: restored {hp} HP."),
            ItemEffect::ShieldRaised => format!("{item}: shield up."),
            ItemEffect::Exploded(dmg) => format!("{item}: {dmg} damage."),
            ItemEffect::Stunned => format!("{item}: enemy stunned."),
        },
        GameEvent::NoItemsAvailable => "No items to use.".into(),
        GameEvent::EscapeAttempted { chance, success } => {
            let result = if *success { "got away" } else { "couldn't shake them" };
            format!("Escape attempt ({:.0}%): {result}.", chance * 100.0)
        }
        GameEvent::EnemyStunned { enemy } => format!("{enemy} is stunned."),
        GameEvent::ShieldAbsorbed { enemy, raw } => {
            format!("Your shield soaks {raw} from {enemy}.")
        }
        GameEvent::EnemyAttacked {
            enemy,
            dealt,
            player_hp,
            ..
        } => format!("{enemy} hits you for {dealt}. ({player_hp} HP left)"),
        GameEvent::EnemyDefeated { enemy, credits } => {
            format!("{enemy} defeated. +{credits} credits.")
        }
        GameEvent::EquipmentEquipped { item, .. } => format!("Equipped {}.", item.name()),
        GameEvent::PlayerDefeated { enemy } => format!("{enemy} killed you."),
        GameEvent::HeatChanged { from, to, .. } => format!("Heat {from} -> {to}."),
        GameEvent::ThreatRaised { level, .. } => format!("Cartel threat now {level}."),
        GameEvent::CreditsGained { amount, total } => format!("+{amount} credits ({total})."),
        GameEvent::CreditsLost { amount, total } => format!("-{amount} credits ({total})."),
        GameEvent::EncounterStarted { kind } => format!("== Encounter: {} ==", kind.label()),
        GameEvent::ChaseDamage { damage, player_hp } => {
            format!("Took {damage} in the chase. ({player_hp} HP left)")
        }
        GameEvent::Evaded => "You got away.".into(),
        GameEvent::BribeUnaffordable { amount } => {
            format!("A bribe would take {amount} credits. You don't have it.")
        }
        GameEvent::BribeAccepted { .. } => "Bribe accepted.".into(),
        GameEvent::BribeRejected { .. } => "They pocket the money and search anyway.".into(),
        GameEvent::SearchClean => "Search came up empty.".into(),
        GameEvent::Confiscated { items } => format!("Confiscated: {}.", items.join(", ")),
        GameEvent::ContractVoided => "Your contract is gone.".into(),
        GameEvent::BluffSucceeded => "They bought it.".into(),
        GameEvent::BluffFailed => "They didn't buy it.".into(),
        GameEvent::SurrenderAccepted { credits_lost } => {
            format!("They take the cargo and {credits_lost} credits.")
        }
        GameEvent::SurrenderRejected => "They want blood, not cargo.".into(),
        GameEvent::DetourTaken { fuel, days } => {
            format!("Detour: {fuel} fuel, {days} extra days.")
        }
        GameEvent::DetourUnaffordable { fuel_needed } => {
            format!("The detour needs {fuel_needed} fuel.")
        }
        GameEvent::HazardImpact {
            dealt, player_hp, ..
        } => format!("Asteroid strike: {dealt} damage. ({player_hp} HP left)"),
        GameEvent::HazardMissed => "You thread the field untouched.".into(),
        GameEvent::LandedAtHub => "Landed at a trade hub.".into(),
        GameEvent::LandedAtBlackMarket => "Landed at a black market.".into(),
        GameEvent::HidingFailed => "Hiding failed.".into(),
        GameEvent::HidingSucceeded => "They never found you.".into(),
        GameEvent::Captured => "Captured.".into(),
        GameEvent::PrisonEscape => "You're out of the cell.".into(),
        GameEvent::RoomEntered { room } => format!("You enter the {}.", room.label()),
        GameEvent::StoneSighted { stone } => format!("The {} Stone!", stone.name()),
        GameEvent::StoneTaken { stone } => format!("You take the {} Stone.", stone.name()),
        GameEvent::CreditsFound { amount } => format!("Found {amount} credits."),
        GameEvent::ItemFound { item } => format!("Found a {item}."),
        GameEvent::CargoFound { name, value, .. } => format!("Found {name} worth {value}."),
        GameEvent::Detected => "Alarms! You've been spotted.".into(),
        GameEvent::ReactorSabotaged => "Reactor sabotaged. The crew scrambles.".into(),
        GameEvent::ExitReached => "Back aboard your ship.".into(),
        GameEvent::DayStarted { day, healed } => {
            if *healed > 0 {
                format!("--- Day {day} --- (+{healed} HP overnight)")
            } else {
                format!("--- Day {day} ---")
            }
        }
        GameEvent::TravelStarted { sectors, fuel_cost } => {
            format!("Flying {sectors} sector(s) for {fuel_cost} fuel.")
        }
        GameEvent::Progress { sectors, remaining } => {
            format!("Covered {sectors} sector(s), {remaining} to go.")
        }
        GameEvent::HubOpened { kind, fuel_price } => {
            format!("Docked at a {} hub. Fuel {fuel_price}/unit.", kind.label())
        }
        GameEvent::FuelPurchased { units, cost } => format!("Bought {units} fuel for {cost}."),
        GameEvent::ContractAccepted { reward, crates, .. } => {
            format!("Signed: {crates} crate(s), {reward} credits.")
        }
        GameEvent::CrateOpened { contents, .. } => format!("Crate: {contents}."),
        GameEvent::ContractDelivered { reward, bonus } => {
            format!("Delivered for {reward} credits ({bonus} early bonus).")
        }
        GameEvent::ContractStolen { stones, entries } => {
            format!("Kept the cargo: {entries} item(s), {stones} stone(s).")
        }
        GameEvent::DeadlineMissed => "Deadline missed. The cartel wants a word.".into(),
        GameEvent::Ending(ending) => format!("*** {} ***", ending.label().to_uppercase()),
        _ => return None,
    };
    Some(text)
}

fn flush_events(game: &mut GameSession) {
    for event in game.events.drain() {
        if let Some(text) = render(&event) {
            println!("{text}");
        }
    }
}

fn print_status(game: &GameSession) {
    let p = &game.player;
    println!();
    println!(
        "Day {} | HP {}/{} | Credits {} | Heat {} | Threat {} | Fuel {}/{}",
        game.day, p.hp, p.max_hp, p.credits, p.heat, p.cartel_threat_level, game.ship.fuel, game.ship.max_fuel
    );
    if let Some(c) = &p.current_contract {
        println!(
            "Contract: {} crate(s), {} sector(s) left, {} day(s) to deadline",
            c.crates.len(),
            c.remaining(),
            c.deadline
        );
    }
}

/// Actions available this day, in menu order
#[derive(Debug, Clone, Copy)]
enum Action {
    Travel,
    LayLow,
    Medkit,
    BuyFuel,
    SignContract,
    Quit,
}

impl Action {
    fn label(&self) -> &'static str {
        match self {
            Self::Travel => "Travel",
            Self::LayLow => "Lay low",
            Self::Medkit => "Use a medkit",
            Self::BuyFuel => "Buy fuel",
            Self::SignContract => "Sign a contract",
            Self::Quit => "Quit",
        }
    }
}

fn available_actions(game: &GameSession) -> Vec<Action> {
    let mut actions = vec![Action::Travel, Action::LayLow];
    if game.player.has_item(ItemKind::Medkit) {
        actions.push(Action::Medkit);
    }
    if game.hub.is_some() {
        actions.push(Action::BuyFuel);
        if game.player.current_contract.is_none() {
            actions.push(Action::SignContract);
        }
    }
    actions.push(Action::Quit);
    actions
}

/// Run hub and item actions until one ends the day. Returns false to quit.
fn play_day(game: &mut GameSession, console: &mut Console) -> Result<bool> {
    loop {
        print_status(game);
        let actions = available_actions(game);
        for (i, action) in actions.iter().enumerate() {
            println!("  {}) {}", i + 1, action.label());
        }
        let pick = console.pick(actions.len());
        if console.closed {
            return Ok(false);
        }

        let result = match actions[pick] {
            Action::Travel => {
                println!("How many sectors? (1-{})", game.ship.speed);
                let sectors = console.pick(game.ship.speed as usize) as u32 + 1;
                game.travel(sectors, console).map(|_| true)
            }
            Action::LayLow => game.lay_low().map(|_| true),
            Action::Medkit => match game.player.find_item(ItemKind::Medkit) {
                Some(index) => game.use_item(index).map(|_| false),
                None => Ok(false),
            },
            Action::BuyFuel => {
                let max = game
                    .hub
                    .as_ref()
                    .map_or(0, |h| h.max_fuel_purchase(&game.player, &game.ship));
                if max == 0 {
                    println!("You can't buy any fuel.");
                    Ok(false)
                } else {
                    println!("How many units? (1-{max})");
                    let units = console.pick(max as usize) as u32 + 1;
                    game.buy_fuel(units).map(|_| false)
                }
            }
            Action::SignContract => sign_contract(game, console).map(|_| false),
            Action::Quit => return Ok(false),
        };

        flush_events(game);
        match result {
            Ok(true) => return Ok(true),
            Ok(false) => {}
            Err(SmugglerError::GameOver(_)) | Err(SmugglerError::NoFuel { .. }) => return Ok(true),
            Err(e) => println!("{e}"),
        }
    }
}

fn sign_contract(game: &mut GameSession, console: &mut Console) -> Result<()> {
    let Some(hub) = game.hub.as_ref() else {
        return Ok(());
    };
    println!("Contract board:");
    for (i, c) in hub.contracts.iter().enumerate() {
        let reward = if c.reward_hidden() {
            "sealed".to_string()
        } else {
            c.reward.to_string()
        };
        println!(
            "  {}) {} crate(s), {} sectors, {} days, reward {reward}, +{} heat",
            i + 1,
            c.crates.len(),
            c.distance,
            c.deadline,
            c.heat_risk()
        );
    }
    println!("  {}) None", hub.contracts.len() + 1);
    let count = hub.contracts.len();
    let pick = console.pick(count + 1);
    if pick < count {
        game.accept_contract(pick)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "star_smuggler=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(name) = args.name {
        config.player.name = name;
    }
    config.validate()?;

    tracing::info!(seed = ?config.seed, "Star Smuggler starting");
    println!("\n=== STAR SMUGGLER ===");
    println!("Captain {}, your tank is dry and your account is thin.", config.player.name);

    let mut game = GameSession::new(&config);
    let mut console = Console { closed: false };
    game.enter_trade_hub(&mut console)?;
    flush_events(&mut game);

    while !game.is_over() {
        let start = game.begin_day(&mut console)?;
        flush_events(&mut game);
        match start {
            DayStart::Ready => {
                if !play_day(&mut game, &mut console)? {
                    break;
                }
            }
            DayStart::Arrived => {}
            DayStart::GameOver(_) => break,
        }
        if console.closed {
            break;
        }
    }

    match game.ending() {
        Some(ending) => println!("\nThe run ends on day {}: {}.", game.day, ending.label()),
        None => println!("\nYou park the ship on day {}.", game.day),
    }
    Ok(())
}
