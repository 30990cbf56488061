// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in starter adventure.
//!
//! Seeds a new project with a known-valid graph so authors start from a
//! working example instead of a blank canvas. Everything here goes
//! through the registry factories and the connection engine; nothing is
//! hand-assembled.

use crate::adventure::Adventure;
use crate::node::{Choice, NodeData, NodeKind};
use crate::registry::create_node;

/// Build "The Haunted Mill", the newcomer starter adventure.
///
/// A short mystery with a human solution: one decision hub, a challenge
/// branch, a combat detour with a flee route, and both endings.
pub fn haunted_mill() -> Adventure {
    let mut adventure = Adventure::new("The Haunted Mill").with_description(
        "A mysterious haunting that isn't what it seems - perfect for newcomers.",
    );
    let id = adventure.id;

    let mut village = create_node(NodeKind::Story, [0.0, 200.0], id);
    village.title = "The Village of Millhaven".to_string();
    village.content = "You arrive in Millhaven as the sun sets. The village elder \
        approaches with worry in her eyes: strange noises come from the old mill at night."
        .to_string();
    let village = adventure.add_node(village);
    adventure.start_node_id = Some(village);

    let mut nightfall = create_node(NodeKind::Decision, [250.0, 200.0], id);
    nightfall.title = "The Mill at Nightfall".to_string();
    nightfall.content = "The elder waits for your answer. The mill looms on the hill, \
        its broken sails creaking in the wind."
        .to_string();
    let (head_out, ask_around, wait) = match &mut nightfall.data {
        NodeData::Decision { choices } => {
            choices[0].text = "Head to the mill right now".to_string();
            choices[1].text = "Ask the villagers about the mill".to_string();
            choices.push(Choice::new("Wait and investigate at dawn"));
            (choices[0].id, choices[1].id, choices[2].id)
        }
        _ => unreachable!("decision factory produces decision data"),
    };
    let nightfall = adventure.add_node(nightfall);

    let mut floorboards = create_node(NodeKind::Challenge, [500.0, 80.0], id);
    floorboards.title = "Creaking Floorboards".to_string();
    floorboards.content = "Inside, the dark mill is a maze of rotten planks and \
        dangling chains. One wrong step will give you away."
        .to_string();
    floorboards.experience_reward = 10;
    if let NodeData::Challenge {
        attribute,
        difficulty,
        description,
        success_text,
        failure_text,
        ..
    } = &mut floorboards.data
    {
        *attribute = "perception".to_string();
        *difficulty = 12;
        *description = "Cross the mill floor without alerting whatever is inside.".to_string();
        *success_text = "You pick a silent path between the loose boards.".to_string();
        *failure_text = "A plank snaps under your heel and something stirs above.".to_string();
    }
    let floorboards = adventure.add_node(floorboards);

    let mut villagers = create_node(NodeKind::Story, [500.0, 320.0], id);
    villagers.title = "What the Villagers Know".to_string();
    villagers.content = "Over watered ale, the villagers share the mill's history: it was \
        abandoned after an accident, and the noises only started a week ago."
        .to_string();
    villagers.experience_reward = 15;
    if let NodeData::Story { objectives } = &mut villagers.data {
        objectives.push("Learn the mill's history".to_string());
    }
    let villagers = adventure.add_node(villagers);

    let mut squatter = create_node(NodeKind::Combat, [750.0, 80.0], id);
    squatter.title = "The Startled Squatter".to_string();
    squatter.content = "A ragged figure bursts from the loft swinging a rusted sickle, \
        more terrified than you are."
        .to_string();
    squatter.experience_reward = 20;
    if let NodeData::Combat {
        enemies,
        victory_text,
        defeat_text,
        ..
    } = &mut squatter.data
    {
        enemies.push("Startled squatter".to_string());
        *victory_text = "You wrestle the sickle away without real harm done.".to_string();
        *defeat_text = "The sickle catches you and you stumble back into the dark.".to_string();
    }
    let squatter = adventure.add_node(squatter);

    let mut rescue = create_node(NodeKind::Story, [1000.0, 200.0], id);
    rescue.title = "The 'Ghost' Revealed".to_string();
    rescue.content = "The haunting was never a ghost: an injured traveler has been \
        trapped in the mill, too weak to call for help during the day. Millhaven \
        celebrates the rescue."
        .to_string();
    rescue.is_victory_node = true;
    rescue.experience_reward = 25;
    rescue.item_rewards.push("Miller's lantern".to_string());
    let rescue = adventure.add_node(rescue);

    let mut lost = create_node(NodeKind::Story, [1000.0, 40.0], id);
    lost.title = "Lost in the Dark".to_string();
    lost.content = "Bruised and turned around, you retreat from the mill empty-handed. \
        The noises continue, and Millhaven's doors stay barred at night."
        .to_string();
    lost.is_failure_node = true;
    let lost = adventure.add_node(lost);

    // Wiring; the template must stay valid, so every port is connected.
    adventure
        .connect(village, "continue", nightfall)
        .expect("template wiring");
    adventure
        .connect(nightfall, &format!("choice-{head_out}"), floorboards)
        .expect("template wiring");
    adventure
        .connect(nightfall, &format!("choice-{ask_around}"), villagers)
        .expect("template wiring");
    adventure
        .connect(nightfall, &format!("choice-{wait}"), villagers)
        .expect("template wiring");
    adventure
        .connect(floorboards, "success", rescue)
        .expect("template wiring");
    adventure
        .connect(floorboards, "failure", squatter)
        .expect("template wiring");
    adventure
        .connect(villagers, "continue", rescue)
        .expect("template wiring");
    adventure
        .connect(squatter, "victory", rescue)
        .expect("template wiring");
    adventure
        .connect(squatter, "defeat", lost)
        .expect("template wiring");
    adventure
        .connect(squatter, "flee", villagers)
        .expect("template wiring");

    adventure
}
