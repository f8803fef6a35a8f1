use crate::creature::Creature;
use crate::errors::{ActionError, BattleStateError};

/// One side's creatures for the duration of a battle, plus which one is out.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleTeam {
    members: Vec<Creature>,
    active: usize,
}

impl BattleTeam {
    /// The first living member starts as active.
    pub fn new(members: Vec<Creature>) -> Result<Self, BattleStateError> {
        if members.is_empty() {
            return Err(BattleStateError::EmptyTeam);
        }
        let active = members.iter().position(Creature::is_alive).unwrap_or(0);
        Ok(Self { members, active })
    }

    pub fn members(&self) -> &[Creature] {
        &self.members
    }

    pub fn into_members(self) -> Vec<Creature> {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Creature> {
        self.members.get(index)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &Creature {
        &self.members[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Creature {
        &mut self.members[self.active]
    }

    pub fn is_defeated(&self) -> bool {
        self.members.iter().all(|member| !member.is_alive())
    }

    pub fn living_count(&self) -> usize {
        self.members.iter().filter(|member| member.is_alive()).count()
    }

    /// Living members other than the active one, in team order.
    pub fn valid_switches(&self) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(index, member)| *index != self.active && member.is_alive())
            .map(|(index, _)| index)
            .collect()
    }

    /// First living member after the active one, wrapping around the team.
    pub fn next_living(&self) -> Option<usize> {
        let len = self.members.len();
        (1..len)
            .map(|offset| (self.active + offset) % len)
            .find(|&index| self.members[index].is_alive())
    }

    /// Check that `index` names a living, non-active member.
    pub fn validate_switch(&self, index: usize) -> Result<(), ActionError> {
        let target = self
            .members
            .get(index)
            .ok_or(ActionError::InvalidTeamIndex(index))?;
        if !target.is_alive() {
            return Err(ActionError::CreatureFainted(target.name().to_string()));
        }
        if index == self.active {
            return Err(ActionError::AlreadyActive(target.name().to_string()));
        }
        Ok(())
    }

    pub fn switch_to(&mut self, index: usize) -> Result<(), ActionError> {
        self.validate_switch(index)?;
        self.active = index;
        Ok(())
    }

    /// Send out the next living member. Returns its index, or `None` if the
    /// team has nobody left.
    pub fn advance(&mut self) -> Option<usize> {
        let next = self.next_living()?;
        self.active = next;
        Some(next)
    }
}
