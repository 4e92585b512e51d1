//! Enlightened Journey
//!
//! Build a hot air balloon with Auguste on Entrana and fly it to Taverley.
//! Progress checkpoints run 0..=100; the quest is complete at 100.

use questkit_data::{
    BranchDef, ConditionDef, ConditionExpr, ConditionalStepDef, GeneralRequirementDef, Id, ItemId, ItemRefDef,
    ItemRequirementDef, NamedConditionDef, PanelDef, QuestDef, QuestMetaDef, Skill, StepDef, StepKindDef,
    WorldPointDef, ZoneDef,
};

use crate::ids::{collections, item, npc, object, varbit, widget};

pub const NAME: &str = "Enlightened Journey";
pub const SLUG: &str = "enlightened-journey";

const AUGUSTE_ENTRANA: WorldPointDef = WorldPointDef::new(2809, 3354, 0);
const PORT_SARIM_MONKS: WorldPointDef = WorldPointDef::new(3047, 3236, 0);
const SAND_PIT: WorldPointDef = WorldPointDef::new(2817, 3342, 0);
const BALLOON_BASKET: WorldPointDef = WorldPointDef::new(2807, 3356, 0);
const AUGUSTE_TAVERLEY: WorldPointDef = WorldPointDef::new(2937, 3421, 0);

const WILLOW_TOOLTIP: &str = "You can get these by using secateurs on a willow tree you've grown. \
     Auguste will give you a sapling to grow during the quest if you need one";

/// Full quest definition, ready for [`crate::loader::build_quest`].
pub fn quest_def() -> QuestDef {
    let mut quest = QuestDef {
        quest: QuestMetaDef {
            name: NAME.to_string(),
            slug: SLUG.to_string(),
            max_progress: 100,
        },
        items: item_requirements(),
        zones: zones(),
        conditions: conditions(),
        steps: steps(),
        conditional_steps: conditional_steps(),
        ..QuestDef::default()
    };

    for checkpoint in [0, 5, 6, 10] {
        quest.step_map.insert(checkpoint, "starting_off".into());
    }
    quest.step_map.insert(20, "making_prototype".into());
    quest.step_map.insert(40, "talk_to_auguste_with_papyrus".into());
    quest.step_map.insert(60, "talk_to_auguste_after_mob".into());
    quest.step_map.insert(70, "getting_final_materials".into());
    quest.step_map.insert(80, "talk_to_auguste_with_branches".into());
    quest.step_map.insert(90, "flight".into());
    quest.step_map.insert(100, "talk_to_auguste_to_finish".into());

    quest.required_items = ids(&[
        "papyrus3",
        "ball_of_wool",
        "sack_of_potatoes",
        "empty_sack8",
        "unlit_candle",
        "yellow_dye",
        "red_dye",
        "silk10",
        "bowl",
        "logs10",
        "tinderbox",
        "willow_branches12",
    ]);
    quest.recommended_items = ids(&["draynor_teleport"]);
    quest.general_requirements = vec![
        GeneralRequirementDef::QuestPoints { points: 20 },
        GeneralRequirementDef::Skill {
            skill: Skill::Firemaking,
            level: 20,
            recommended: false,
        },
        GeneralRequirementDef::Skill {
            skill: Skill::Farming,
            level: 30,
            recommended: true,
        },
        GeneralRequirementDef::Skill {
            skill: Skill::Crafting,
            level: 36,
            recommended: true,
        },
    ];
    quest.panels = panels();
    quest
}

fn ids(keys: &[&str]) -> Vec<Id> {
    keys.iter().map(|k| (*k).to_string()).collect()
}

fn req(id: &str, name: &str, item: ItemId, quantity: u32) -> ItemRequirementDef {
    ItemRequirementDef {
        id: id.into(),
        name: name.into(),
        item,
        alternates: Vec::new(),
        quantity,
        tooltip: None,
    }
}

fn item_requirements() -> Vec<ItemRequirementDef> {
    let mut empty_sack8 = req("empty_sack8", "Empty sack", item::EMPTY_SACK, 8);
    empty_sack8.alternates.push(item::SANDBAG);

    let mut unlit_candle = req("unlit_candle", "Unlit candle", item::CANDLE, 1);
    unlit_candle.alternates.push(item::BLACK_CANDLE);

    let mut willow_branches12 = req("willow_branches12", "Willow branches", item::WILLOW_BRANCH, 12);
    willow_branches12.tooltip = Some(WILLOW_TOOLTIP.to_string());

    let mut draynor_teleport = req("draynor_teleport", "Draynor/Port Sarim teleport", item::EXPLORERS_RING_3, 1);
    draynor_teleport
        .alternates
        .extend([item::EXPLORERS_RING_4, item::DRAYNOR_MANOR_TELEPORT]);
    draynor_teleport.alternates.extend(collections::amulets_of_glory());

    vec![
        req("papyrus3", "Papyrus", item::PAPYRUS, 3),
        req("papyrus2", "Papyrus", item::PAPYRUS, 2),
        req("papyrus", "Papyrus", item::PAPYRUS, 1),
        req("ball_of_wool", "Ball of wool", item::BALL_OF_WOOL, 1),
        req("sack_of_potatoes", "Sack of potatoes (10)", item::POTATOES10, 1),
        empty_sack8,
        unlit_candle,
        req("yellow_dye", "Yellow dye", item::YELLOW_DYE, 1),
        req("red_dye", "Red dye", item::RED_DYE, 1),
        req("silk10", "Silk", item::SILK, 10),
        req("bowl", "Bowl", item::BOWL, 1),
        req("logs10", "Logs", item::LOGS, 10),
        req("tinderbox", "Tinderbox", item::TINDERBOX, 1),
        willow_branches12,
        draynor_teleport,
        req("balloon_structure", "Balloon structure", item::BALLOON_STRUCTURE, 1),
        req("origami_balloon", "Origami balloon", item::ORIGAMI_BALLOON, 1),
        req("sandbag8", "Sandbag", item::SANDBAG, 8),
    ]
}

fn zones() -> Vec<ZoneDef> {
    vec![ZoneDef {
        id: "entrana".into(),
        min: WorldPointDef::new(2798, 3327, 0),
        max: WorldPointDef::new(2878, 3394, 1),
    }]
}

fn pred(condition: ConditionDef) -> ConditionExpr {
    ConditionExpr::Pred(condition)
}

fn has_item(item: &str) -> ConditionExpr {
    pred(ConditionDef::HasItem { item: item.into() })
}

fn named(id: &str, condition: ConditionExpr) -> NamedConditionDef {
    NamedConditionDef {
        id: id.into(),
        condition,
    }
}

fn conditions() -> Vec<NamedConditionDef> {
    let (group, child) = widget::BALLOON_CONTROLS;
    vec![
        named("on_entrana", pred(ConditionDef::InZone { zone: "entrana".into() })),
        named("has_balloon_structure", has_item("balloon_structure")),
        named("has_origami_balloon", has_item("origami_balloon")),
        named(
            "has_sandbags",
            ConditionExpr::Any(vec![
                pred(ConditionDef::Varbit {
                    varbit: varbit::SANDBAGS_GIVEN,
                    value: 1,
                }),
                has_item("sandbag8"),
            ]),
        ),
        named(
            "flying",
            pred(ConditionDef::WidgetText {
                group,
                child,
                text: "Balloon Controls".into(),
            }),
        ),
    ]
}

fn step(id: &str, kind: StepKindDef, description: &str) -> StepDef {
    StepDef {
        id: id.into(),
        kind,
        description: description.into(),
        location: None,
        items: Vec::new(),
        dialogue: Vec::new(),
        icon: None,
    }
}

fn auguste_step(id: &str, location: WorldPointDef, description: &str) -> StepDef {
    StepDef {
        location: Some(location),
        ..step(
            id,
            StepKindDef::Npc {
                npc: npc::AUGUSTE,
                name: "Auguste".into(),
            },
            description,
        )
    }
}

fn with_items(mut step: StepDef, items: Vec<ItemRefDef>) -> StepDef {
    step.items = items;
    step
}

fn with_dialogue(mut step: StepDef, dialogue: &[&str]) -> StepDef {
    step.dialogue = ids(dialogue);
    step
}

fn steps() -> Vec<StepDef> {
    let travel_to_entrana = StepDef {
        location: Some(PORT_SARIM_MONKS),
        ..step(
            "travel_to_entrana",
            StepKindDef::Npc {
                npc: npc::MONK_OF_ENTRANA_1167,
                name: "Monk of Entrana".into(),
            },
            "Bank all weapons and armour you have, and go to Port Sarim to get a boat to Entrana.",
        )
    };

    let talk_to_auguste = with_dialogue(
        with_items(
            auguste_step("talk_to_auguste", AUGUSTE_ENTRANA, "Talk to Auguste on Entrana 3 times."),
            vec![ItemRefDef::plain("papyrus3"), ItemRefDef::plain("ball_of_wool")],
        ),
        &["Yes! Sign me up.", "Umm, yes. What's your point?", "Yes."],
    );

    let use_papyrus_on_wool = with_items(
        step("use_papyrus_on_wool", StepKindDef::Detailed, "Use papyrus on a ball of wool."),
        vec![ItemRefDef::highlighted("papyrus"), ItemRefDef::highlighted("ball_of_wool")],
    );

    let use_candle_on_balloon = with_items(
        step("use_candle_on_balloon", StepKindDef::Detailed, "Use a candle on the balloon."),
        vec![
            ItemRefDef::highlighted("unlit_candle"),
            ItemRefDef::highlighted("balloon_structure"),
        ],
    );

    let talk_to_auguste_again = with_dialogue(
        with_items(
            auguste_step("talk_to_auguste_again", AUGUSTE_ENTRANA, "Talk to Auguste again."),
            vec![ItemRefDef::plain("origami_balloon")],
        ),
        &["Yes, I have them here."],
    );

    let talk_to_auguste_with_papyrus = with_items(
        auguste_step(
            "talk_to_auguste_with_papyrus",
            AUGUSTE_ENTRANA,
            "Talk to Auguste with 2 papyrus and a sack of potatoes.",
        ),
        vec![ItemRefDef::plain("papyrus2"), ItemRefDef::plain("sack_of_potatoes")],
    );

    let talk_to_auguste_after_mob = auguste_step(
        "talk_to_auguste_after_mob",
        AUGUSTE_ENTRANA,
        "Talk to Auguste after the flash mob.",
    );

    let fill_sacks = StepDef {
        location: Some(SAND_PIT),
        items: vec![ItemRefDef::highlighted("empty_sack8")],
        icon: Some(item::EMPTY_SACK),
        ..step(
            "fill_sacks",
            StepKindDef::Object {
                object: object::SAND_PIT,
                name: "Sand pit".into(),
            },
            "Fill your empty sacks on the sand pit south of Auguste.",
        )
    };

    let talk_to_auguste_with_dye = with_dialogue(
        with_items(
            auguste_step(
                "talk_to_auguste_with_dye",
                AUGUSTE_ENTRANA,
                "Give Auguste the yellow and red dye, 8 sandbags, 10 silk and a bowl.",
            ),
            vec![
                ItemRefDef::plain("yellow_dye"),
                ItemRefDef::plain("red_dye"),
                ItemRefDef::plain("sandbag8"),
                ItemRefDef::plain("silk10"),
                ItemRefDef::plain("bowl"),
            ],
        ),
        &["Yes, I want to give you some items.", "Dye.", "Sandbags.", "Silk.", "Bowl."],
    );

    let talk_to_auguste_with_branches = StepDef {
        location: Some(BALLOON_BASKET),
        items: vec![ItemRefDef::highlighted("willow_branches12")],
        icon: Some(item::WILLOW_BRANCH),
        ..step(
            "talk_to_auguste_with_branches",
            StepKindDef::Object {
                object: object::BALLOON_BASKET,
                name: "Basket".into(),
            },
            "Get 12 willow branches and use them to make the basket.",
        )
    };

    let talk_to_auguste_with_logs_and_tinderbox = with_dialogue(
        with_items(
            auguste_step(
                "talk_to_auguste_with_logs_and_tinderbox",
                AUGUSTE_ENTRANA,
                "Talk to Auguste to fly.",
            ),
            vec![ItemRefDef::plain("logs10"), ItemRefDef::plain("tinderbox")],
        ),
        &["Okay."],
    );

    let do_puzzle = step(
        "do_puzzle",
        StepKindDef::Puzzle {
            instructions: ids(&[
                "Steer the balloon to Taverley using the balloon controls.",
                "Add logs to rise and drop sandbags to climb sharply.",
                "Tug the rope to move forward and pull the valve to descend.",
                "Avoid the birds and the clouds; crashing sends you back to the start.",
            ]),
        },
        "Fly the balloon to Taverley.",
    );

    let talk_to_auguste_to_finish = auguste_step(
        "talk_to_auguste_to_finish",
        AUGUSTE_TAVERLEY,
        "Talk to Auguste in Taverley to finish the quest.",
    );

    vec![
        travel_to_entrana,
        talk_to_auguste,
        use_papyrus_on_wool,
        use_candle_on_balloon,
        talk_to_auguste_again,
        talk_to_auguste_with_papyrus,
        talk_to_auguste_after_mob,
        fill_sacks,
        talk_to_auguste_with_dye,
        talk_to_auguste_with_branches,
        talk_to_auguste_with_logs_and_tinderbox,
        do_puzzle,
        talk_to_auguste_to_finish,
    ]
}

fn conditional(id: &str, default: &str, branches: &[(&str, &str)]) -> ConditionalStepDef {
    ConditionalStepDef {
        id: id.into(),
        default: default.into(),
        branches: branches
            .iter()
            .map(|(condition, step)| BranchDef {
                condition: (*condition).into(),
                step: (*step).into(),
            })
            .collect(),
    }
}

fn conditional_steps() -> Vec<ConditionalStepDef> {
    vec![
        conditional("starting_off", "travel_to_entrana", &[("on_entrana", "talk_to_auguste")]),
        // branch order matters: holding the finished origami balloon wins
        conditional(
            "making_prototype",
            "use_papyrus_on_wool",
            &[
                ("has_origami_balloon", "talk_to_auguste_again"),
                ("has_balloon_structure", "use_candle_on_balloon"),
            ],
        ),
        conditional(
            "getting_final_materials",
            "fill_sacks",
            &[("has_sandbags", "talk_to_auguste_with_dye")],
        ),
        // varbit 2868 flips to 1 once landed, but progress moves to 100 anyway
        conditional(
            "flight",
            "talk_to_auguste_with_logs_and_tinderbox",
            &[("flying", "do_puzzle")],
        ),
    ]
}

fn panels() -> Vec<PanelDef> {
    vec![
        PanelDef {
            label: "Making a balloon".into(),
            steps: ids(&[
                "travel_to_entrana",
                "talk_to_auguste",
                "use_papyrus_on_wool",
                "use_candle_on_balloon",
                "talk_to_auguste_again",
                "talk_to_auguste_with_papyrus",
                "talk_to_auguste_after_mob",
                "fill_sacks",
                "talk_to_auguste_with_dye",
            ]),
            items: ids(&[
                "papyrus3",
                "ball_of_wool",
                "unlit_candle",
                "sack_of_potatoes",
                "empty_sack8",
                "yellow_dye",
                "red_dye",
                "silk10",
                "bowl",
            ]),
        },
        PanelDef {
            label: "Flying".into(),
            steps: ids(&[
                "talk_to_auguste_with_branches",
                "talk_to_auguste_with_logs_and_tinderbox",
                "do_puzzle",
                "talk_to_auguste_to_finish",
            ]),
            items: ids(&["willow_branches12", "logs10", "tinderbox"]),
        },
    ]
}
