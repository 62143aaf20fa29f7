use super::types::{EquipmentSlot, Item};
use crate::core::command::{CommandError, CommandResult, Outcome};
use crate::core::constants::INVENTORY_CAPACITY;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Equipped items, one per slot.
///
/// IMPORTANT: New slots need `#[serde(default)]` so older saves still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub helmet: Option<Item>,
    pub armor: Option<Item>,
    pub gloves: Option<Item>,
    pub boots: Option<Item>,
    pub necklace: Option<Item>,
    pub ring: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Helmet => &self.helmet,
            EquipmentSlot::Armor => &self.armor,
            EquipmentSlot::Gloves => &self.gloves,
            EquipmentSlot::Boots => &self.boots,
            EquipmentSlot::Necklace => &self.necklace,
            EquipmentSlot::Ring => &self.ring,
        }
    }

    pub fn get_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Helmet => &mut self.helmet,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Gloves => &mut self.gloves,
            EquipmentSlot::Boots => &mut self.boots,
            EquipmentSlot::Necklace => &mut self.necklace,
            EquipmentSlot::Ring => &mut self.ring,
        }
    }

    /// Puts `item` in its slot and returns whatever was there before.
    pub fn equip(&mut self, item: Item) -> Option<Item> {
        self.get_mut(item.slot).replace(item)
    }

    pub fn take(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.get_mut(slot).take()
    }

    /// Equipped items in slot order.
    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [
            &self.weapon,
            &self.helmet,
            &self.armor,
            &self.gloves,
            &self.boots,
            &self.necklace,
            &self.ring,
        ]
        .into_iter()
        .filter_map(|item| item.as_ref())
    }

    pub fn slot_of(&self, id: Uuid) -> Option<EquipmentSlot> {
        self.iter_equipped().find(|item| item.id == id).map(|item| item.slot)
    }
}

/// Loose items not currently equipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inventory {
    pub items: Vec<Item>,
    pub capacity: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            capacity: INVENTORY_CAPACITY,
        }
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn get(&self, id: Uuid) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Adds an item, handing it back if there is no room.
    pub fn insert(&mut self, item: Item) -> Result<(), Item> {
        if self.is_full() {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    /// Returns a displaced item even past capacity; an equip swap must never
    /// destroy the previous occupant.
    pub fn insert_displaced(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }
}

/// Moves an inventory item into its slot. A displaced item goes back to the
/// inventory in its place, so the item count never changes.
pub fn equip_item(equipment: &mut Equipment, inventory: &mut Inventory, id: Uuid) -> CommandResult {
    let item = inventory
        .remove(id)
        .ok_or_else(|| CommandError::not_found("Item not in inventory"))?;
    let name = item.display_name();
    let message = match equipment.equip(item) {
        Some(previous) => {
            let message = format!("Equipped {} (replaced {})", name, previous.display_name());
            inventory.insert_displaced(previous);
            message
        }
        None => format!("Equipped {}", name),
    };
    Ok(Outcome::done(message))
}

pub fn unequip_item(
    equipment: &mut Equipment,
    inventory: &mut Inventory,
    slot: EquipmentSlot,
) -> CommandResult {
    if equipment.get(slot).is_none() {
        return Err(CommandError::not_found(format!("Nothing equipped in {}", slot.name())));
    }
    if inventory.is_full() {
        return Err(CommandError::invalid("Inventory is full"));
    }
    let Some(item) = equipment.take(slot) else {
        return Err(CommandError::not_found(format!("Nothing equipped in {}", slot.name())));
    };
    let message = format!("Unequipped {}", item.display_name());
    inventory.insert_displaced(item);
    Ok(Outcome::done(message))
}
