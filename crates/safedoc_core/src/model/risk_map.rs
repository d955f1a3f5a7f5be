//! Four-quadrant risk map attached to the risk analysis forms.

use crate::risk::quadrant::{quadrant_for, Quadrant};
use crate::risk::reconcile::reconcile_quadrant;
use crate::risk::RiskId;
use serde::{Deserialize, Serialize};

/// Free text per quadrant of a risk diagram.
///
/// Text may mix reconciler-managed risk numbers with lines typed by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskMap {
    #[serde(rename = "frente")]
    pub front: String,
    #[serde(rename = "atras")]
    pub back: String,
    #[serde(rename = "esquerda")]
    pub left: String,
    #[serde(rename = "direita")]
    pub right: String,
}

impl RiskMap {
    /// Returns the text of one quadrant.
    pub fn quadrant(&self, quadrant: Quadrant) -> &str {
        match quadrant {
            Quadrant::Front => &self.front,
            Quadrant::Back => &self.back,
            Quadrant::Left => &self.left,
            Quadrant::Right => &self.right,
        }
    }

    /// Quadrant texts in `Quadrant::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Quadrant, &str)> + '_ {
        Quadrant::ALL
            .into_iter()
            .map(move |quadrant| (quadrant, self.quadrant(quadrant)))
    }

    /// Returns mutable access to one quadrant's text.
    pub fn quadrant_mut(&mut self, quadrant: Quadrant) -> &mut String {
        match quadrant {
            Quadrant::Front => &mut self.front,
            Quadrant::Back => &mut self.back,
            Quadrant::Left => &mut self.left,
            Quadrant::Right => &mut self.right,
        }
    }

    /// Replaces one quadrant's text.
    pub fn set_quadrant(&mut self, quadrant: Quadrant, text: impl Into<String>) {
        *self.quadrant_mut(quadrant) = text.into();
    }

    /// Applies one risk toggle to the risk's quadrant.
    ///
    /// Returns the quadrant that was reconciled.
    pub fn apply_risk_toggle(&mut self, risk_id: RiskId, selected: bool) -> Quadrant {
        let quadrant = quadrant_for(risk_id);
        let slot = self.quadrant_mut(quadrant);
        *slot = reconcile_quadrant(slot, risk_id, &risk_id.to_string(), selected);
        quadrant
    }

    /// Returns whether every quadrant is blank.
    pub fn is_blank(&self) -> bool {
        Quadrant::ALL
            .into_iter()
            .all(|quadrant| self.quadrant(quadrant).trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::RiskMap;
    use crate::risk::quadrant::Quadrant;

    #[test]
    fn toggle_writes_only_the_assigned_quadrant() {
        let mut map = RiskMap::default();
        assert_eq!(map.apply_risk_toggle(12, true), Quadrant::Left);
        assert_eq!(map.left, "12");
        assert!(map.front.is_empty());
        assert!(map.back.is_empty());
        assert!(map.right.is_empty());
    }

    #[test]
    fn toggle_preserves_manual_text_in_the_quadrant() {
        let mut map = RiskMap::default();
        map.set_quadrant(Quadrant::Right, "atenção: chuva forte\n17. maré alta");

        map.apply_risk_toggle(16, true);
        assert_eq!(map.right, "16\n17. maré alta\natenção: chuva forte");

        map.apply_risk_toggle(16, false);
        assert_eq!(map.right, "17. maré alta\natenção: chuva forte");
    }

    #[test]
    fn serde_uses_quadrant_ids() {
        let mut map = RiskMap::default();
        map.apply_risk_toggle(3, true);
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["frente"], "3");
        assert_eq!(json["atras"], "");
    }

    #[test]
    fn blank_detection_ignores_whitespace() {
        let mut map = RiskMap::default();
        assert!(map.is_blank());
        map.set_quadrant(Quadrant::Back, "  \n");
        assert!(map.is_blank());
        map.apply_risk_toggle(7, true);
        assert!(!map.is_blank());
    }
}
