//! Fixed keys and vectors shared by the tests.
//!
//! Keys and known answers were produced with pyca/cryptography (OpenSSL backend):
//! RSA keys with e = 65537, RSAES-OAEP ciphertexts, RFC 3394 key wraps,
//! MGF1 masks via a direct hashlib implementation.

use core::num::NonZeroU32;

use hex_literal::hex;
use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, RngCore, SeedableRng};

use crate::key::PrivateKey;
use crate::numbers::Unsigned;

// 2048 bit key, p > q

pub const P_2048: [u8; 128] = hex!("
    f0e5e5c64bc6b0bc71b3d56f165e56f71be56233746fc7cef68191115667e826
    e7feccc2974c7b14cb8f9c87a2d5ef4be4238ad0540166e00dd0c926d8467ebc
    71e34e850874a001d8b075ec982e4bef6834a459a1ed49f4b77c2d644d2f9127
    08cb17fc5610c9927c24470d10436925372d94635100d52045b4d4b4f3de0669
");

pub const Q_2048: [u8; 128] = hex!("
    cfa77ab00d3f4ba8d89595e176d3d7d1893b742b8950726be7ef3cfefa09f433
    c9a508321e70a4d4852572be5122c9e74cbda1cd374ca0a8b0fa727662547671
    098f77d0688903c58df33068853af01ed503399793a9d42ebf87e5a34ab4c7ed
    abeac9eba70c7c0c3e1f1bc34c07891f1ae3dbdaeec264913bd87ceb50352be5
");

pub const N_2048: [u8; 256] = hex!("
    c3677e3775a6cc674e56418ef32f489a7f5c34e477375a8025095ebb19ffbaaa
    71ad390c21c0a7b03219457c63302219e01c5acd4b0491dd3f6612bb2c12a5d2
    269e5866fea36b1c3cfb27a1cae5cbc89a85c244261512b13798731a613232b0
    45b5b04260ab2b9db85cae0da3ff9b39f51bed2a611f690a9cf62fc71136f1b2
    fec864a939b0b4b7c595ed8cb82d20555223034e60595a78a12045d834cafac6
    6c0b1fbfe726ea5846c88cfb12c5e8d0b5a82be8f970aa6b6c275f1a4afe0642
    35f3bb3eb58977da853d19f49e6f697deb697a072581cfed50ef4d6effe5b927
    dcdd0ccc759a852ebbc433e18c70c9d749e1e196e4bf7f0053ab482f946c5eed
");

pub const DP_2048: [u8; 128] = hex!("
    27359427a96fc696757f4acf10f9fbf7ae8fb06325a1880914b0541759540242
    4ae27b1b751adab1b0cc4832ff7b08bef67c1e7cf81f5e4a3b956f18267d9ae5
    3b383f308206d1805b6fa55204170cff039c05e01cee0d6a8a6ee8c87993b371
    8209e4768adfa29f781b438149d35f0ad2a7558eb0c18ceefac98b1184dbef79
");

pub const DQ_2048: [u8; 128] = hex!("
    994d3c9f42786b23f119a5f838e0b6a123de37aa788a629ed530e2e81eb2408e
    071d064af1fc19442833f85d16cb4721b29f0117deee7c616d9ec7e82c39cce3
    30bab12ab4320b0dcaf931d0c82335e89d3bef45bf270ed5a062f49eb3e57900
    36fe7429bc3ed449b986ffd9138530af3d0be160e509b073242a7436c915281d
");

pub const QINV_2048: [u8; 128] = hex!("
    db6ef1d4627007ac817f5096f3b31fb8800f0d43cf5798ff4e630fafcf6561f1
    c11333a86e6bfe7e09fb71e426dce7ee83a7d27b5b03cb9e31b9417e1855dcf9
    8950309c1a8abfc878f57518257f3d086244c3650d06577a7f92ee959a22ff3b
    bdb3bc110e713854c9536ae403bb58636c12beed4a97cc156eba6ee3f111319b
");

/// $e^{-1} \bmod \varphi(n)$
pub const D_PHI_2048: [u8; 256] = hex!("
    073292b59c41ce99a78b09d32825ffb8a12456566c05bff1a46b99efae5f7b12
    b8293746b91f8d8db1eab862828ccd54c2aa88b5b323b1f3c258122c8ecd090a
    9a9d8e880cad1c4ee7f82057974fab97f2092744b75a635bdfbe5fcf02f18468
    75c8e17b30705da4eb9b8e55b64abdfefe864ed016cfbf60c2b356c3306123b9
    f19edee2b8dfd0f648d062a3b0b9999822ef479471bf4e2eb8331a686482dbd9
    fffdba058e06658c7cc7ef0372e4fff1ff680d134c353e66b71803bea191e499
    2cdd7f27f07c6e0d5e3d2cc31d4f8af0e82bafa2273a2fde4d869a9a207c9c7b
    5829492d2d3affd2601bcc97a37c615a6a82650a6cd955fc37451f45dc21ccc1
");

/// RSAES-OAEP, SHA-384, empty label, of `OAEP_PLAINTEXT`
pub const OAEP_SHA384_2048: [u8; 256] = hex!("
    13f66a022290f8bbde94dccf160d45db37992f1ba7d2dd795b0456d28af6822c
    0eac7adc3d826a8634d2e17af5b620c9f4ccf2ea74b5846d802b9ae25064dcd6
    cb4331b4809baa7958f58067e59fc9de2664fd9f3bfcd163e4684280641e8b28
    6dbd079be57ab3035c77424af0682c1a8621fc9ce8bca2fc75c007c5cf436ebe
    2cc82a897e410dcd5c0ffb6fa9e4018137c959747c44976e1f527731d0603789
    750310829505a8e1ff0da8868aef68a9166e8009d303e4771d6a9b545ad8fe98
    9020442b1502f9a2920670d6d0292970e85404ae06cec5976c3c47cd3b64917e
    c01d2e9e80a46f6c509659bca581028c6806a330999222b9e1751306afe7329c
");

/// RSAES-OAEP, SHA-256, label `OAEP_LABEL`, of `OAEP_MESSAGE`
pub const OAEP_SHA256_LABEL_2048: [u8; 256] = hex!("
    1b10d316d3b0b1e3547dc5bcfcc372090c9fcb92de15daf43782b6ffb6abcedd
    f686d2ff582421d4fa57c32d0599bee816df8f83e483f6812099104b6ff60f4a
    afa50e855dbca6e3f8da69295db6dcc49688ccc6c9155290980349dd23fa83cf
    a001ba4667c43cb1a7b11be72520143324b63125981cdc71ea1ac34d017c7ae0
    f32bcca2b44fcedc98da5323a1d292360e32f906cfb033d7e45a4381b4022e80
    033f174d5c2bdda2c96be10fffc825e45e836a843979bf69209b6851dfcc5ba3
    f8923fc43deab4feea129caa8d9317e2c08e37f6873b4487dac9b30958bef685
    8b0a370ec2a10b07b3cb48cdd4e3a4b1ffd91c26e8efd775cd2dcf8ecaf0577f
");

/// $2^e \bmod n$
pub const RAW2_2048: [u8; 256] = hex!("
    a8ee19aef51b2f6a77badf2d6f117b5fecb010079da2f075163d7bea4c4b256e
    94ed23977ee1a5867fb1b854e14381893df2ccc9632eab0268b6efd2b2b660c0
    725cbbf68bb942e951f85e7ab607a7c07ccdb524382ef9e3575f35bd59952b70
    14eb414431aa96a2cc9971a56418a579591237a0e2209fc37cfaf28fd1351312
    9d0243523e420bf9675d78d8ed7bf91fb7129a1160bdc807bdd848703a3437b6
    bc1a051b470e7a6546087f0297ea6b90632c66f4c7f09c80470e4fd76bab082d
    2c8cc26e4d87526bca7361c8cd3b6f74991a7fc5c4fc1fbbef67e981f48754cb
    782f1ba278b828f66a940541a52e35f6c104116e13e92daf9222febe33ff155e
");

// 3072 bit key, p > q

pub const P_3072: [u8; 192] = hex!("
    d44dddd0d72f6ef53f15576da11b81b72f7ada49d0311b866c7a5f0bda7e7c19
    50953ec735a82d73dc67cbed6a8cfaf0c643e964264cc84bcb4939849fe0ecf8
    a410884415bbdaaa7a0c786e90f594c57b0ed600f30e4c1fde9d621507b0b224
    7315e6c115abad8c4c483617dc4709273aedb1b1b74c4f588f20e37571d35f22
    74f2d6a2289da2be0acfc256da03f24ec8ea6c80c11c016f78199537e79453f0
    4b685d08f37181c492d029fa41a6b5d0a3b626d624309d0d29304569ba334f93
");

pub const Q_3072: [u8; 192] = hex!("
    ccb3a4ef62047969960cf8be57d287089dc272d0ce2a57a43c89e32cee7c2250
    76e38ca9843e641c0d483582c1154c7b36c85020e0c575a99e2843721a935b19
    f85ef6935a0365fce786cdf9dea5cb5b877becc2a844b017173386f24693e012
    3733eec764f4e6f0fc9d09566a2b010f1bda266e76da367bfabfa321cd54e4e4
    f8c92e7ad29270c3ad4fa711ecae4052f9e817547ad2a9a5c1ad8a04346733d5
    f20b578dc42aaf00009d36c45d42f35e61289bb6d6e8e8e8fc82b4270f782fb9
");

pub const N_3072: [u8; 384] = hex!("
    a9c307fcec95a73b13f96874683be24eb30062baa89e0ef2cba60d1dbb5f59cd
    78e8d504840496bd8022cb52eea766ae08d7198748c7ff8b7066c04dfb4322c2
    d0e7f517b75eafb7401e1655b54c80da88da52d6945fe0d281d2a7f27d0e4957
    031b8de88113dd87f3e8157404214de9a166511d877d3354802141488f5e6b0a
    67a30028d9cec8e384637600981fefb05aa20728ba6fd4cf6faf2b5c3936c215
    81b3c73ccebbc17cb73093d6a7359baaf8e16cacd31c358be07b49f4400bfd72
    d484545a9d40a63d31201712cfbeff1e9afadfdd8a9a3e3e75577cfbb938dbf3
    0c45c681c84b5b2bddc4daa56e906ae4fd5af443689247f18f89b9c73637b80a
    f9517cfcbf8b5b4f022e3cfb808741701fa6f8941c31a83e3c201080df4bca1e
    068cfaac8213297f7c61188792e768481f694dc04092ea4d7c7dbfd020900d05
    8f63a269e27e11eac2cc9064e9d0e03b577db821dc601657d4aac100db66d143
    e7efa7b1d0bcf27c584520eaa01a68ead711bd473f855b66ea8357b2e4987e3b
");

pub const DP_3072: [u8; 192] = hex!("
    9bc415bf2862b0f2573a7d4efe29845eb703582d5806efbf0cd02bf4327722ee
    1fe5a08de09c67dcde1579d5d39b64724bc57ff3eef5deef5d5378540a49a914
    34abbc8ed7b360983bbbf2908ce2e22892452c56bdfdfb74568cfa6d9b9ad4d9
    5166fc4b266f33820065eaea4ebfffc33cc530dec731c1f5a3ede9753df26b96
    885fb3827e7249f94d4d69b4f77875cbc035df2e088157bc454ddfe188939792
    72813be1595c2a6de399bf72d1c0531da53ffbf699cee12bcad093dd22b48ae9
");

pub const DQ_3072: [u8; 192] = hex!("
    741ae0ce36563b573c18976dbefa5644f8d635b1617e7abf58e70cc78b6d3539
    5675b26ee3e74f78e9bfaf3a3eb209f3491b4cf79905e6bb124ddc1378276460
    d2936a60218a13eae2977f74de684373e2e0d3658573903d48979d4f05e11212
    c2e4dde692c8a5c4c2437fec57c39492314606ce58f3643be5f99459b3d11713
    185963d79e60193da3abae23688f5d44b32285391181336024fe7d6ded1b2c37
    89560d8f0758fe718de79e0cbaa922c8c16afb0735d65d64e8f469a24e0fe961
");

pub const QINV_3072: [u8; 192] = hex!("
    bdb6f970ae073fe2222f5ffd9deab3bb3ced3125bdea5ffe33755099146ef6a1
    3d68fd0efe334ef34ce63f820b7b5beb364e20629cb1ad106aaac4a524489518
    f851124d5826deba9c15eee24d86628551d862c5a37beecda224baa4df2ae09c
    e3b8ee9a31cb68bb60edd3d3030a8cdea8e2673619c392e2a70018c7debe30d1
    d8da5a25019893b44e8c3f601104863fc4184ed5dbff859aa8f1355e0b85ab4a
    909ce90d038fef533f79532dd79e9f8d678b42b4c8536d069df5c8fb01869fb9
");

/// $e^{-1} \bmod \varphi(n)$
pub const D_PHI_3072: [u8; 384] = hex!("
    1f7aec2b49d0029fe0f75a18640fdeca8b452209cd24ea4eb9d7040da4666d27
    be2926ff5c5fe178289fcb2688dd001c7bc52f95b7b866b9fbd1020e33eee22e
    504103612f7ede84d3de00744a57727993f130755c345f6389f17f75671d541a
    4f98377b8b1c1cf38e16568c1a0bf6ffc10f513171a394f631807933b46a64dd
    1c14ccfdc64e235095874025a210220988f50cf0cf89d763d4291e984e7fca03
    e4f66a96eb1b4429156b6baedd790271f50f10710800ee290f2aadaf1e855aad
    3849250745505b91356bdd0b87805e7f7c159076970a99ec04f2d62dba1140a6
    08dd1e1dae96a0104c75e5458c30cee12c5e6d20cac1cc9836943e0ac73899b5
    ebbb78be808aafd2afe4ac9edeff6edb95e15a555ce06df437648c446dd171db
    746f7b1eb046de3cf7411b2426da88e43159478fb47ae732ca82bf4ebdf5d9fe
    ce4cdfcd98030d8f7b0c5af35cabdeb3612f5256775630f6bbf4445650ccdb66
    f34b62ec7e7f658ce772becf2a355908c254f3cbc0ce6259341613aead618f71
");

/// RSAES-OAEP, SHA-384, empty label, of `OAEP_PLAINTEXT`
pub const OAEP_SHA384_3072: [u8; 384] = hex!("
    56dac49c8d32b969549276e7b875b8550a7045054893c23657dbe8a9856e4015
    b888626e25a0b8d6a09fa05d43bdffbc8ef39fa074d4484172d69cf92d280403
    0dd624b1127159f819e0b8abe93abdc745dc852bc3d16ec52c67d9e0a7734ac9
    0e88c0a32819d72c347670eb524f6725928c14f2e237e261893396fa276f224e
    874c12635d4c4d1155d955ff2942e0eb6a1d0ba781005c70651071d1db6000ed
    ccdd8f607d9629dd8aec9077d9a8e4c48ad6441b6a2ab38bced9afce756d2713
    94b13c64ce4c646f93606d3c24a3afa2bd88f39eac3d7f36cf1826c100b7574f
    db727e51642cbd5a2f2014ddfb2701736e7d20805581d9781dd216e0bf7aa724
    2612304533aea48113daa0629ab17ea71ca1c08f7cc449c52a2fcd12f96f9676
    70195cfec5de8430f822edbcf16103b6c041006f1d9501659483b4724e58bab5
    021c658eb38de9804cb605bdcaa90e93bef75f809b5aaec0c02be9f757aae51d
    5d6b22e8cf7ab246829200258234c05bf7bffcc03373216ca744a66f59ff87e5
");

/// RSAES-OAEP, SHA-256, label `OAEP_LABEL`, of `OAEP_MESSAGE`
pub const OAEP_SHA256_LABEL_3072: [u8; 384] = hex!("
    1bf98429f53c8d4324f0d55eea52566e97a3157cd8aaade7d5ed80171e6f9571
    3c6022b108519e46039cbb26f735cedf072d70155639aaa93fee8efbf707cce2
    0bd125ac73b47537113dc4e6dcaaac80cbf9577752aa7b15011053282efdc866
    8bf190eac3fbc8606d5346f37b2cfd8abba47b1f75a72e333ac71d7ddd5bb274
    ef8f0460dc3069b47f78f49f75703ffaa6cc584d11f4b7b10362d9c513764be8
    f0f5ec3383d74f60a4cf70dfcba69897ee7a033ec41a39e64d8f5ac22640fba9
    ce21aad42daba3306d1df67330217f5389268cdf253113c3cb974a4dd9d11265
    ceb90583fb5846e07e4141ed9fe9d59cd8fda36f337b0c8835caf3621b1aaf1c
    a8becaec6b250603fd14bb71d45553f8cdedb88012f5385688af4ab34fb536e4
    83859acff51f3ffd0028088f55661135cd24f7e638a98b5138c86e31bea58b43
    f0e94f3fa833682b2cd54ae472c56c4cc4f024d285f1319609c8bbecbd00a7a8
    8108cfdaab54a760c45c81a37f4b42a2d7130c46cdd69dcd1b0f2cae124049b0
");

/// $2^e \bmod n$
pub const RAW2_3072: [u8; 384] = hex!("
    3a4fa751d973725a0f6b6368b6c5627e1dbdee27767dfbd599b8255e595ab656
    4835ce78d7495641152a99622fc7ec254b7e8e4631ac509d5782684aa3eb1a24
    aeab4ea16d337bc88fbefaf6d018e066466fe1dfa6920c9f534ee16630825bbc
    63cb9d5a977db227f1c21ddf6dc20d6e62b3e811fc271d5df99fe4774d36d292
    31a50f657efa2d3cbcb5f0dc43eb20068dd4615df0561a6c7d8c3de3905427dc
    b75121b810f65e3287496fc9794bf509ddb93599a6358f2b97d0f53fbe3bb1ef
    771db9b7e15c5a7ef97a435f0c67f0cc4e3e7ed249719e61af40a33232e68a15
    d1c2e94849573c0869cbbebcd45a43dadb23a8bdab60c1d99dd85e03ece8cfaa
    18a8f0dbe8c75acde40251081c10f57d1f517e61d75ce09fd1350e564d18b707
    5db87c37b2646e8cc2072a43606d709fcaec62f974389c8839a0681fb0468e36
    5bbca5dbadd410f8c6946a5f0c31499a638a62b3fc504051d22b391bf0bd48f6
    71c191d096378d86c1bf9b0248a5b33e8e8e1701018a7037a07239a68e8cae46
");

pub const OAEP_PLAINTEXT: [u8; 32] = hex!("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f");
pub const OAEP_LABEL: &[u8] = b"key-store";
pub const OAEP_MESSAGE: &[u8] = b"yamnord";

// RFC 3394 key wraps

pub const KEK_256: [u8; 32] = hex!("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f");
pub const KEK_128: [u8; 16] = hex!("000102030405060708090a0b0c0d0e0f");
pub const KEY_256: [u8; 32] = hex!("00112233445566778899aabbccddeeff000102030405060708090a0b0c0d0e0f");
pub const KEY_128: [u8; 16] = hex!("00112233445566778899aabbccddeeff");

/// `KEY_256` wrapped with `KEK_256` (RFC 3394, 4.6)
pub const WRAPPED_256_BY_256: [u8; 40] = hex!("
    28c9f404c4b810f4cbccb35cfb87f8263f5786e2d80ed326cbc7f0e71a99f43b
    fb988b9b7a02dd21
");

/// `KEY_128` wrapped with `KEK_128` (RFC 3394, 4.1)
pub const WRAPPED_128_BY_128: [u8; 24] = hex!("1fa68b0a8112b447aef34bd8fb5a7b829d3e862371d2cfe5");

/// `KEY_128` wrapped with `KEK_256` (RFC 3394, 4.3)
pub const WRAPPED_128_BY_256: [u8; 24] = hex!("64e8c3f9ce0f5ba263e9777905818a2a93c8191e7d6e8ae7");

// MGF1

/// MGF1-SHA-256, seed `b"foo"`, 50 bytes
pub const MGF1_SHA256_FOO_50: [u8; 50] = hex!("
    3bdaba83cff13337b323ac383ca3995863e922f511b931b9efd4e0118cfc70f0
    8678390d67e3c12dbeb2d7a78bdfa597b5a3
");

/// MGF1-SHA-384, seed `b"bar"`, 100 bytes
pub const MGF1_SHA384_BAR_100: [u8; 100] = hex!("
    301f6d57b4b67ac5d327aa8e564b1254b9a7828e300913d8486b2628e1d62285
    fb517d0b83f401e15f4d0d6fda8a9b9c8fbd054c23c8adc74ceba931631d432e
    76c904bdbdb1267c54b9f4d5c50b01c545e8ea54f66ed86ae596c0489edd2a46
    7c494cb5
");

pub fn key_2048() -> PrivateKey<64, 32> {
    PrivateKey::from_primes(
        Unsigned::from_be_bytes(&P_2048).unwrap(),
        Unsigned::from_be_bytes(&Q_2048).unwrap(),
    ).unwrap()
}

pub fn key_3072() -> PrivateKey<96, 48> {
    PrivateKey::from_primes(
        Unsigned::from_be_bytes(&P_3072).unwrap(),
        Unsigned::from_be_bytes(&Q_3072).unwrap(),
    ).unwrap()
}

/// Reproducible randomness.
pub fn rng() -> ChaCha20Rng {
    ChaCha20Rng::from_seed([0x42; 32])
}

/// Fills with an incrementing byte counter. Not random at all.
pub struct CountingRng(pub u8);

impl RngCore for CountingRng {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill_bytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest {
            *byte = self.0;
            self.0 = self.0.wrapping_add(1);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for CountingRng {}

/// An entropy source that is out of order.
pub struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        unimplemented!()
    }

    fn next_u64(&mut self) -> u64 {
        unimplemented!()
    }

    fn fill_bytes(&mut self, _: &mut [u8]) {
        unimplemented!()
    }

    fn try_fill_bytes(&mut self, _: &mut [u8]) -> Result<(), rand_core::Error> {
        Err(NonZeroU32::new(rand_core::Error::CUSTOM_START).unwrap().into())
    }
}

impl CryptoRng for FailingRng {}
