use qk::ids::{collections, item, varbit};
use qk::*;
use questkit_engine as qk;

fn quest() -> QuestHelper {
    qk::quests::load_builtin("enlightened-journey").unwrap()
}

fn resolved_key(quest: &QuestHelper, state: &StateSnapshot) -> String {
    quest.resolve(state.progress, state).unwrap().unwrap().step.key.clone()
}

#[test]
fn every_declared_checkpoint_resolves_to_a_step() {
    let quest = quest();
    let state = StateSnapshot::default();
    for checkpoint in quest.steps().keys() {
        assert!(*checkpoint <= quest.max_progress);
        let res = quest.resolve(*checkpoint, &state).unwrap();
        assert!(res.is_some(), "checkpoint {checkpoint} resolved to nothing");
    }
}

#[test]
fn early_checkpoints_share_one_branch_point() {
    let quest = quest();
    let keys: Vec<&String> = [0_u32, 5, 6, 10].iter().map(|c| &quest.steps()[c]).collect();
    assert!(keys.iter().all(|k| *k == "starting_off"));
    assert!(quest.conditional_step("starting_off").is_some());
}

#[test]
fn being_on_entrana_switches_to_auguste() {
    let quest = quest();
    let mut state = StateSnapshot::at_progress(5);
    state.move_to(WorldPoint::new(3047, 3236, 0));
    assert_eq!(resolved_key(&quest, &state), "travel_to_entrana");
    state.move_to(WorldPoint::new(2809, 3354, 0));
    assert_eq!(resolved_key(&quest, &state), "talk_to_auguste");
    // zone spans the upper plane too
    state.move_to(WorldPoint::new(2878, 3394, 1));
    assert_eq!(resolved_key(&quest, &state), "talk_to_auguste");
}

#[test]
fn origami_balloon_wins_over_balloon_structure() {
    let quest = quest();
    let mut state = StateSnapshot::at_progress(20);
    assert_eq!(resolved_key(&quest, &state), "use_papyrus_on_wool");
    state.give(item::BALLOON_STRUCTURE, 1);
    assert_eq!(resolved_key(&quest, &state), "use_candle_on_balloon");
    state.give(item::ORIGAMI_BALLOON, 1);
    assert_eq!(resolved_key(&quest, &state), "talk_to_auguste_again");
}

#[test]
fn sandbags_come_from_inventory_or_varbit() {
    let quest = quest();
    let mut state = StateSnapshot::at_progress(70);
    assert_eq!(resolved_key(&quest, &state), "fill_sacks");
    state.give(item::SANDBAG, 7);
    assert_eq!(resolved_key(&quest, &state), "fill_sacks");
    state.give(item::SANDBAG, 1);
    assert_eq!(resolved_key(&quest, &state), "talk_to_auguste_with_dye");

    let mut handed_over = StateSnapshot::at_progress(70);
    handed_over.set_varbit(varbit::SANDBAGS_GIVEN, 1);
    assert_eq!(resolved_key(&quest, &handed_over), "talk_to_auguste_with_dye");
}

#[test]
fn balloon_controls_widget_starts_the_puzzle() {
    let quest = quest();
    let mut state = StateSnapshot::at_progress(90);
    assert_eq!(resolved_key(&quest, &state), "talk_to_auguste_with_logs_and_tinderbox");
    state.show_widget(471, 1, "Balloon Controls");
    assert_eq!(resolved_key(&quest, &state), "do_puzzle");
    state.close_widget(471, 1);
    assert_eq!(resolved_key(&quest, &state), "talk_to_auguste_with_logs_and_tinderbox");
}

#[test]
fn completion_checkpoint_points_to_taverley() {
    let quest = quest();
    let step = quest.resolve(100, &StateSnapshot::default()).unwrap().unwrap().step;
    assert_eq!(step.key, "talk_to_auguste_to_finish");
    assert_eq!(step.location, Some(WorldPoint::new(2937, 3421, 0)));
}

#[test]
fn alternates_satisfy_item_requirements() {
    let quest = quest();
    let sacks = quest.item_requirements().iter().find(|r| r.key == "empty_sack8").unwrap();
    let mut state = StateSnapshot::default();
    state.give(item::SANDBAG, 8);
    assert_eq!(sacks.satisfied_by(&state), Some(item::SANDBAG));

    let candle = quest.item_requirements().iter().find(|r| r.key == "unlit_candle").unwrap();
    let mut state = StateSnapshot::default();
    state.give(item::BLACK_CANDLE, 1);
    assert!(candle.is_satisfied(&state));

    let teleport = &quest.item_recommended()[0];
    for glory in collections::amulets_of_glory() {
        let mut state = StateSnapshot::default();
        state.give(glory, 1);
        assert_eq!(teleport.satisfied_by(&state), Some(glory));
    }
}

#[test]
fn quantities_are_not_pooled_across_alternates() {
    let quest = quest();
    let sacks = quest.item_requirements().iter().find(|r| r.key == "empty_sack8").unwrap();
    let mut state = StateSnapshot::default();
    state.give(item::EMPTY_SACK, 4).give(item::SANDBAG, 4);
    assert!(!sacks.is_satisfied(&state));
    assert_eq!(sacks.best_count(&state), 4);
}

#[test]
fn teleport_is_recommended_not_required() {
    let quest = quest();
    assert!(quest.item_requirements().iter().all(|r| r.key != "draynor_teleport"));
    let recommended: Vec<&str> = quest.item_recommended().iter().map(|r| r.key.as_str()).collect();
    assert_eq!(recommended, vec!["draynor_teleport"]);
    assert_eq!(quest.item_requirements().len(), 12);
}

#[test]
fn only_mandatory_general_requirements_block() {
    let quest = quest();
    let mut state = StateSnapshot::default();
    state.quest_points = 20;
    state.set_skill(questkit_data::Skill::Firemaking, 20);
    assert!(quest.meets_general_requirements(&state));

    state.set_skill(questkit_data::Skill::Firemaking, 19);
    let unmet = quest.unmet_general_requirements(&state);
    assert_eq!(unmet.len(), 1);
    assert_eq!(unmet[0].to_string(), "Level 20 Firemaking");
}

#[test]
fn every_panel_step_is_reachable_from_the_step_map() {
    let quest = quest();
    let mut reachable: Vec<String> = Vec::new();
    for key in quest.steps().values() {
        match quest.node(key).unwrap() {
            StepNode::Step(step) => reachable.push(step.key.clone()),
            StepNode::Conditional(cond) => {
                reachable.push(cond.default.clone());
                reachable.extend(cond.branches.iter().map(|b| b.step.clone()));
            },
        }
    }
    let panel_steps: Vec<&String> = quest.panels().iter().flat_map(|p| p.steps.iter()).collect();
    assert_eq!(panel_steps.len(), 13);
    for key in panel_steps {
        assert!(reachable.contains(key), "panel step '{key}' is not reachable");
    }
}

#[test]
fn panels_are_ordered_with_their_items() {
    let quest = quest();
    let labels: Vec<&str> = quest.panels().iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["Making a balloon", "Flying"]);
    assert_eq!(quest.panel_for_step("do_puzzle").unwrap().label, "Flying");
    let flying_items: Vec<&str> = quest.panels()[1].items.iter().map(|i| i.key.as_str()).collect();
    assert_eq!(flying_items, vec!["willow_branches12", "logs10", "tinderbox"]);
}

#[test]
fn highlighted_items_are_marked_per_step() {
    let quest = quest();
    let fill = quest.quest_step("fill_sacks").unwrap();
    assert_eq!(fill.highlighted_items().count(), 1);
    assert_eq!(fill.icon, Some(item::EMPTY_SACK));
    let talk = quest.quest_step("talk_to_auguste").unwrap();
    assert_eq!(talk.highlighted_items().count(), 0);
    assert_eq!(talk.dialogue.len(), 3);
}

#[test]
fn forward_only_session_keeps_candle_step_after_structure_is_used_up() {
    let quest = quest();
    let mut session = QuestSession::new(&quest, ResolutionMode::ForwardOnly);
    let mut state = StateSnapshot::at_progress(20);
    state.give(item::BALLOON_STRUCTURE, 1);
    assert_eq!(session.refresh(&state).unwrap().unwrap().key, "use_candle_on_balloon");

    state.take_all(item::BALLOON_STRUCTURE);
    assert_eq!(session.refresh(&state).unwrap().unwrap().key, "use_candle_on_balloon");

    let mut reactive = QuestSession::new(&quest, ResolutionMode::Reactive);
    assert_eq!(reactive.refresh(&state).unwrap().unwrap().key, "use_papyrus_on_wool");
}
