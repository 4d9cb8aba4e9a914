//! End-to-end scenario tests driving [`Core`] exclusively through
//! `Core::new`/`Core::step`, the way a host binary would. Each test mirrors
//! one named scenario from the documented testable properties: a worker
//! crash, a supply block, a gas-starved queue, a stuck prerequisite, a
//! proxy sighting, and a worker caught by a roaming threat.

mod support;

use bw_macro_core::{
    action::Command,
    api::PlayerResources,
    geometry::Point2,
    ids::UnitTypeId,
    opponent_plan_recognizer::OpeningPlan,
    player::{Alliance, Race},
    production_queue::MacroAct,
    world::Core,
};
use support::{build_all_units, unit, FakeCollaborators, FakeGameClient};

const START: Point2 = Point2 { x: 50.0, y: 50.0 };

#[test]
fn opening_survival_replan_clears_queue_to_workers() {
    let mut game = FakeGameClient::new(Race::Terran, Race::Terran);
    game.start_locations = vec![START];
    game.reveal_around(START, 10);
    let depot = unit(1, UnitTypeId::CommandCenter, Alliance::Own, START);
    let patch = unit(2, UnitTypeId::MineralField, Alliance::Neutral, START.offset(3.0, 0.0));
    let w1 = unit(3, UnitTypeId::Scv, Alliance::Own, START.offset(1.0, 0.0));
    let w2 = unit(4, UnitTypeId::Scv, Alliance::Own, START.offset(1.0, 1.0));
    game.all_units = build_all_units(vec![depot, patch, w1, w2]);
    game.resources = PlayerResources { minerals: 0, gas: 0, supply_used: 8, supply_total: 40 };

    let mut core = Core::new(&game);
    let mut scout = FakeCollaborators::default();
    let mut combat = FakeCollaborators::default();
    core.step(&mut game, &mut scout, &mut combat);

    assert_eq!(core.queue.len(), 3);
    let mut saw_supply_provider = false;
    for (_, item) in core.queue.front_prefix(core.queue.len()) {
        assert_eq!(item.act, MacroAct::Unit(UnitTypeId::Scv));
        saw_supply_provider |= item.act.is_supply_provider();
    }
    assert!(!saw_supply_provider);
}

#[test]
fn supply_block_injects_one_supply_depot() {
    let mut game = FakeGameClient::new(Race::Terran, Race::Terran);
    game.start_locations = vec![START];
    game.reveal_around(START, 10);
    let depot = unit(1, UnitTypeId::CommandCenter, Alliance::Own, START);
    let patch = unit(2, UnitTypeId::MineralField, Alliance::Neutral, START.offset(3.0, 0.0));
    let workers: Vec<_> = (0..4).map(|i| unit(10 + i, UnitTypeId::Scv, Alliance::Own, START.offset(1.0, i as f32))).collect();
    let mut units = vec![depot, patch];
    units.extend(workers);
    game.all_units = build_all_units(units);
    // 18 total / 17 used -> 1 available, one short of the Marine's 2-supply
    // cost. supply_block_detected is a strict `>` check, so the boundary
    // numbers have to clear it rather than sit exactly on it.
    game.resources = PlayerResources { minerals: 50, gas: 0, supply_used: 17, supply_total: 18 };

    let mut core = Core::new(&game);
    let mut scout = FakeCollaborators::default();
    let mut combat = FakeCollaborators::default();
    core.queue.push_back(bw_macro_core::production_queue::ProductionItem::new(MacroAct::Unit(UnitTypeId::Marine)));

    core.step(&mut game, &mut scout, &mut combat);
    assert_eq!(core.queue.len(), 2);
    assert_eq!(core.queue.peek_back().unwrap().act, MacroAct::Unit(UnitTypeId::SupplyDepot));

    core.step(&mut game, &mut scout, &mut combat);
    let depot_count = core.queue.front_prefix(core.queue.len()).filter(|(_, i)| i.act.is_supply_provider()).count();
    assert_eq!(depot_count, 1);
    assert_eq!(core.queue.len(), 2);
}

#[test]
fn gas_starved_item_is_reordered_behind_a_gas_free_one() {
    let mut game = FakeGameClient::new(Race::Terran, Race::Terran);
    game.start_locations = vec![START];
    game.reveal_around(START, 10);
    let depot = unit(1, UnitTypeId::CommandCenter, Alliance::Own, START);
    let patch = unit(2, UnitTypeId::MineralField, Alliance::Neutral, START.offset(3.0, 0.0));
    let mut factory = unit(3, UnitTypeId::Factory, Alliance::Own, START.offset(6.0, 0.0));
    factory.is_idle = true;
    let workers: Vec<_> = (0..4).map(|i| unit(10 + i, UnitTypeId::Scv, Alliance::Own, START.offset(1.0, i as f32))).collect();
    let mut units = vec![depot, patch, factory];
    units.extend(workers);
    game.all_units = build_all_units(units);
    game.resources = PlayerResources { minerals: 300, gas: 0, supply_used: 8, supply_total: 40 };

    let mut core = Core::new(&game);
    let mut scout = FakeCollaborators::default();
    let mut combat = FakeCollaborators::default();
    core.queue.push_back(bw_macro_core::production_queue::ProductionItem::new(MacroAct::Unit(UnitTypeId::Vulture)));
    core.queue.push_back(bw_macro_core::production_queue::ProductionItem::new(MacroAct::Unit(UnitTypeId::SiegeTank)));

    core.step(&mut game, &mut scout, &mut combat);

    assert_eq!(core.queue.len(), 1);
    assert_eq!(core.queue.peek_back().unwrap().act, MacroAct::Unit(UnitTypeId::SiegeTank));
    assert_eq!(game.commands_for(3), vec![&Command::Make(UnitTypeId::Vulture)]);
}

#[test]
fn production_jam_on_an_unmet_prerequisite_clears_the_queue_and_goes_out_of_book() {
    let mut game = FakeGameClient::new(Race::Protoss, Race::Protoss);
    game.start_locations = vec![START];
    game.reveal_around(START, 10);
    let depot = unit(1, UnitTypeId::Nexus, Alliance::Own, START);
    let patch = unit(2, UnitTypeId::MineralField, Alliance::Neutral, START.offset(3.0, 0.0));
    let workers: Vec<_> = (0..4).map(|i| unit(10 + i, UnitTypeId::Probe, Alliance::Own, START.offset(1.0, i as f32))).collect();
    let mut units = vec![depot, patch];
    units.extend(workers);
    game.all_units = build_all_units(units);
    game.resources = PlayerResources { minerals: 300, gas: 300, supply_used: 8, supply_total: 40 };

    let mut core = Core::new(&game);
    let mut scout = FakeCollaborators::default();
    let mut combat = FakeCollaborators::default();
    core.queue.push_back(bw_macro_core::production_queue::ProductionItem::new(MacroAct::Unit(UnitTypeId::DarkTemplar)));

    assert!(!core.strategy.out_of_book);
    for _ in 0..360 {
        core.step(&mut game, &mut scout, &mut combat);
    }

    assert!(core.queue.is_empty());
    assert!(core.strategy.out_of_book);
}

#[test]
fn a_barracks_near_our_main_latches_a_proxy_read_that_survives_a_later_contradiction() {
    let mut game = FakeGameClient::new(Race::Terran, Race::Terran);
    game.start_locations = vec![START];
    game.reveal_around(START, 10);
    let depot = unit(1, UnitTypeId::CommandCenter, Alliance::Own, START);
    let patch = unit(2, UnitTypeId::MineralField, Alliance::Neutral, START.offset(3.0, 0.0));
    let enemy_barracks = unit(3, UnitTypeId::Barracks, Alliance::Enemy, START.offset(18.0, 0.0));
    game.all_units = build_all_units(vec![depot, patch, enemy_barracks]);
    game.resources = PlayerResources { minerals: 50, gas: 0, supply_used: 8, supply_total: 40 };
    game.frame = 1800;

    let mut core = Core::new(&game);
    let mut scout = FakeCollaborators::default();
    let mut combat = FakeCollaborators::default();
    core.step(&mut game, &mut scout, &mut combat);
    assert_eq!(core.recognizer.plan, OpeningPlan::Proxy);

    let depot2 = unit(1, UnitTypeId::CommandCenter, Alliance::Own, START);
    let patch2 = unit(2, UnitTypeId::MineralField, Alliance::Neutral, START.offset(3.0, 0.0));
    game.all_units = build_all_units(vec![depot2, patch2]);
    game.frame = 1812;
    core.step(&mut game, &mut scout, &mut combat);
    assert_eq!(core.recognizer.plan, OpeningPlan::Proxy);
}

#[test]
fn a_mining_drone_burrows_from_a_nearby_vulture_then_unburrows_once_safe() {
    let mut game = FakeGameClient::new(Race::Zerg, Race::Terran);
    game.start_locations = vec![START];
    let mut drone = unit(1, UnitTypeId::Drone, Alliance::Own, START);
    drone.is_idle = false;
    let vulture = unit(2, UnitTypeId::Vulture, Alliance::Enemy, START.offset(3.0, 0.0));
    game.all_units = build_all_units(vec![drone.clone(), vulture]);
    game.frame = 0;

    let mut core = Core::new(&game);
    let mut scout = FakeCollaborators::default();
    let mut combat = FakeCollaborators::default();
    core.step(&mut game, &mut scout, &mut combat);
    assert_eq!(game.commands_for(1), vec![&Command::Burrow]);

    let mut burrowed_drone = drone.clone();
    burrowed_drone.is_burrowed = true;
    let far_vulture = unit(2, UnitTypeId::Vulture, Alliance::Enemy, START.offset(1000.0, 0.0));
    game.all_units = build_all_units(vec![burrowed_drone.clone(), far_vulture.clone()]);
    game.frame = 29;
    core.step(&mut game, &mut scout, &mut combat);
    assert!(!game.commands_for(1).contains(&&Command::Unburrow));

    game.all_units = build_all_units(vec![burrowed_drone, far_vulture]);
    game.frame = 116;
    core.step(&mut game, &mut scout, &mut combat);
    assert!(game.commands_for(1).contains(&&Command::Unburrow));
}
