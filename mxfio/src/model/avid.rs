//! Avid-extended data model: vendor sets registered through the same
//! registry API as the baseline, so Avid-flavoured files expose these as
//! first-class sets rather than dark metadata.

use super::keys::GENERIC_PACKAGE_SET_KEY;
use super::{baseline, DataModel, ItemType};
use crate::labels::ul;
use crate::prelude::*;
use crate::types::Ul;
use once_cell::sync::Lazy;

pub const AVID_TAGGED_VALUE_SET_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x02 0x53 0x01 0x01 0x0d 0x01 0x01 0x01 0x01 0x01 0x3f 0x00);

pub const TAGGED_VALUE_NAME_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x03 0x02 0x01 0x02 0x09 0x01 0x00 0x00);
pub const TAGGED_VALUE_VALUE_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x03 0x02 0x01 0x02 0x0a 0x01 0x00 0x00);

/// Attributes and user comments hang off any package as tagged values.
pub const PACKAGE_ATTRIBUTES_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x03 0x02 0x01 0x02 0x0b 0x01 0x00 0x00);
pub const PACKAGE_USER_COMMENTS_ITEM_KEY: Ul =
    ul!(0x06 0x0e 0x2b 0x34 0x01 0x01 0x01 0x02 0x03 0x02 0x01 0x02 0x0c 0x01 0x00 0x00);

static AVID: Lazy<DataModel> = Lazy::new(|| build().expect("avid data model"));

/// The finalised Avid-extended model: the baseline plus vendor sets.
pub fn avid() -> &'static DataModel {
    &AVID
}

fn build() -> Result<DataModel> {
    let mut m = DataModel::new();
    super::baseline::register_all(&mut m)?;

    m.register_set(AVID_TAGGED_VALUE_SET_KEY, None, "TaggedValue")?;
    m.register_item(
        AVID_TAGGED_VALUE_SET_KEY,
        TAGGED_VALUE_NAME_ITEM_KEY,
        0,
        ItemType::Utf16String,
        true,
        "Name",
    )?;
    m.register_item(
        AVID_TAGGED_VALUE_SET_KEY,
        TAGGED_VALUE_VALUE_ITEM_KEY,
        0,
        ItemType::Bytes,
        true,
        "Value",
    )?;

    m.register_item(
        GENERIC_PACKAGE_SET_KEY,
        PACKAGE_ATTRIBUTES_ITEM_KEY,
        0,
        ItemType::StrongRefArray,
        false,
        "MobAttributeList",
    )?;
    m.register_item(
        GENERIC_PACKAGE_SET_KEY,
        PACKAGE_USER_COMMENTS_ITEM_KEY,
        0,
        ItemType::StrongRefArray,
        false,
        "UserComments",
    )?;

    m.finalise()?;
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avid_model_extends_baseline() {
        let model = avid();
        assert!(model.set_def(&AVID_TAGGED_VALUE_SET_KEY).is_some());
        assert!(model
            .find_item(&GENERIC_PACKAGE_SET_KEY, &PACKAGE_ATTRIBUTES_ITEM_KEY)
            .is_some());
        // vendor sets stay dark in the baseline model
        assert!(baseline().set_def(&AVID_TAGGED_VALUE_SET_KEY).is_none());
    }
}
