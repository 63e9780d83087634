#![allow(dead_code)]

use ansible_vault::prelude::*;

pub const PASSWORD: &str = "pa$$w0rd";
pub const SECRET: &str = "password: superSecret123!";

/// `SECRET` sealed by Ansible under `PASSWORD`, format 1.1.
pub const VAULT_V1_1: &str = concat!(
    "$ANSIBLE_VAULT;1.1;AES256\n",
    "37333730633265356131656330306537623666613631386461653831666535626462396366663434\n",
    "6636366139393135623266336635323566623437613738320a653335663533636163656431623965\n",
    "31633361343932363361333862303033316161666461313261623639303238616462653161316336\n",
    "3933366163366665650a396236616335626132653038393330633035383864646564386535393831\n",
    "38376361376666653862366337356365616236346137346436653566386663366562",
);

/// `SECRET` sealed by Ansible under `PASSWORD` with the identifier `prod`.
pub const VAULT_V1_2_PROD: &str = concat!(
    "$ANSIBLE_VAULT;1.2;AES256;prod\n",
    "38373439396163396339326133633263383839646331346366396562666335653162346332646265\n",
    "6164363632396564306131373030306630613834353664630a656538316632613366366632653463\n",
    "66366535636562393063383665376563383838316364313661636462343333663961353438343831\n",
    "3863303135376437660a346135623536376631666130376336306263376666396336323261306135\n",
    "39373133326337656366313132363763363465343364613461393763343731313363",
);

/// A `prod` envelope whose stored HMAC was altered.
pub const VAULT_BAD_INTEGRITY: &str = concat!(
    "$ANSIBLE_VAULT;1.2;AES256;prod\n",
    "37336134643233303839636435313435343930623234346237623734303234393934636636646333\n",
    "3061356466639965393832656564346330346565656162380a653935303936666166333863333832\n",
    "63336239663162643136626133613962373230376562323362643336393862626661383461306366\n",
    "6463623430326566650a376235366430353633353338313935363564366433613863343230333864\n",
    "30353030346364363065373137356239386231303862373939313735303131373139",
);

/// A `prod` envelope containing non-hex garbage in its body.
pub const VAULT_BAD_VALUES: &str = concat!(
    "$ANSIBLE_VAULT;1.2;AES256;prod\n",
    "37336134643233303839636435313435343930623234346237623734303234393934636636646333\n",
    "3061356466633365393832656564346330346565656162380a653935303936666166333863333832\n",
    "63336239663162643136626133613962373230376562323362643336393862626661383461306366\n",
    "6463623430326XX6650a376235366430353633353338313935363564366433613863343230333864\n",
    "30353030346364363065373137356239386231303862373939313735303131373139",
);

/// A 1.1 envelope whose plaintext carries a single padding byte.
pub const VAULT_SHORT_PADDING: &str = concat!(
    "$ANSIBLE_VAULT;1.1;AES256\n",
    "39616236653463303233376233653238346662373130323030353739386531666137626235653731\n",
    "6664386130373163613138623161333861373531353863650a323233303933323963623834383730\n",
    "39633230636265346538663164393832613737363533643863313034613931653762616264616230\n",
    "3430316130363330300a353562613239346662343062623335396136633938643930306638323261\n",
    "3239353563626639",
);

/// Plaintext recovered from [`VAULT_SHORT_PADDING`].
pub const SHORT_PADDING_SECRET: &str = "superduperpa§§§";

/// Initializes a Vault bound to the fixture password.
#[must_use]
pub fn setup_vault() -> Vault {
    Vault::new(PASSWORD)
}

/// Converts a `\n` envelope to `\r\n` line endings.
#[must_use]
pub fn crlf(envelope: &str) -> String {
    envelope.replace('\n', "\r\n")
}
