//! The UE4 object version line.
//!
//! Every variant is one package format change. Only the relative order is
//! meaningful to the decoder: gates compare with `>=`, so variants must stay
//! contiguous and in engine history order.

version_line! {
    /// Package file version of the UE4 line (`FileVersionUE4`)
    pub enum ObjectVersion {
        OldestLoadablePackage = 214,
        BlueprintVarsNotReadOnly,
        StaticMeshStoreNavCollision,
        AtmosphericFogDecayNameChange,
        ScenecompTranslationToLocation,
        MaterialAttributesReordering,
        CollisionProfileSetting,
        BlueprintSkelTemporaryTransient,
        BlueprintSkelSerializedAgain,
        BlueprintSetsReplication,
        WorldLevelInfo,
        AfterCapsuleHalfHeightChange,
        AddedNamespaceAndKeyDataToFtext,
        AttenuationShapes,
        LightcomponentUseIesTextureMultiplierOnNonIesBrightness,
        RemoveInputComponentsFromBlueprints,
        Vark2nodeUseMemberrefstruct,
        RefactorMaterialExpressionScenecolorAndScenedepthInputs,
        SplineMeshOrientation,
        ReverbEffectAssetType,
        MaxTexcoordIncreased,
        SpeedtreeStaticmesh,
        LandscapeComponentLazyReferences,
        SwitchCallNodeToUseMemberReference,
        AddedSkeletonArchiverRemoval,
        AddedSkeletonArchiverRemovalSecondTime,
        BlueprintSkelClassTransientAgain,
        AddCookedToUclass,
        DeprecatedStaticMeshThumbnailPropertiesRemoved,
        CollectionsInShadermapid,
        RefactorMovementComponentHierarchy,
        FixTerrainLayerSwitchOrder,
        AllPropsToConstraintinstance,
        LowQualityDirectionalLightmaps,
        AddedNoiseEmitterComponent,
        AddTextComponentVerticalAlignment,
        AddedFbxAssetImportData,
        RemoveLevelbodysetup,
        RefactorCharacterCrouch,
        SmallerDebugMaterialshaderUniformExpressions,
        ApexCloth,
        SaveCollisionresponsePerChannel,
        AddedLandscapeSplineEditorMesh,
        ChangedMaterialRefactionType,
        RefactorProjectileMovement,
        RemovePhysicalmaterialproperty,
        PurgedFmaterialCompileOutputs,
        AddCookedToLandscape,
        ConsumeInputPerBind,
        SoundClassGraphEditor,
        FixupTerrainLayerNodes,
        RetrofitClampExpressionsSwap,
        RemoveLightMobilityClasses,
        RefactorPhysicsBlending,
        WorldLevelInfoUpdated,
        StaticSkeletalMeshSerializationFix,
        RemoveStaticmeshMobilityClasses,
        RefactorPhysicsTransforms,
        RemoveZeroTriangleSections,
        CharacterMovementDeceleration,
        CameraActorUsingCameraComponent,
        CharacterMovementDeprecatePitchRoll,
        RebuildTextureStreamingDataOnLoad,
        Support32BitStaticMeshIndices,
        AddedChunkidToAssetdataAndUpackage,
        CharacterDefaultMovementBindings,
        ApexClothLod,
        AtmosphericFogCacheData,
        ArrayPropertyInnerTags,
        KeepSkelMeshIndexData,
        BodysetupCollisionConversion,
        ReflectionCaptureCooking,
        RemoveDynamicVolumeClasses,
        StoreHascookeddataForBodysetup,
        RefractionBiasToRefractionDepthBias,
        RemoveSkeletalphysicsactor,
        PcRotationInputRefactor,
        LandscapePlatformdataCooking,
        CreateexportsClassLinkingForBlueprints,
        RemoveNativeComponentsFromBlueprintScs,
        RemoveSinglenodeinstance,
        CharacterBrakingRefactor,
        VolumeSampleLowQualitySupport,
        SplitTouchAndClickEnables,
        HealthDeathRefactor,
        SoundNodeEnveloperCurveChange,
        PointLightSourceRadius,
        SceneCaptureCameraChange,
        MoveSkeletalmeshShadowcasting,
        ChangeSetarrayBytecode,
        MaterialInstanceBasePropertyOverrides,
        CombinedLightmapTextures,
        BumpedMaterialExportGuids,
        BlueprintInputBindingOverrides,
        FixupBodysetupInvalidConvexTransform,
        FixupStiffnessAndDampingScale,
        ReferenceSkeletonRefactor,
        K2nodeReferenceguids,
        FixupRootboneParent,
        TextRenderComponentsWorldSpaceSizing,
        MaterialInstanceBasePropertyOverridesPhase2,
        ClassNotplaceableAdded,
        WorldLevelInfoLodList,
        CharacterMovementVariableRenaming1,
        FslatesoundConversion,
        WorldLevelInfoZorder,
        PackageRequiresLocalizationGatherFlagging,
        BpActorVariableDefaultPreventing,
        TestAnimcompChange,
        EditoronlyBlueprints,
        EdgraphpintypeSerialization,
        NoMirrorBrushModelCollision,
        ChangedChunkidToBeAnArrayOfChunkids,
        WorldNamedAfterPackage,
        SkyLightComponent,
        WorldLayerEnableDistanceStreaming,
        RemoveZonesFromModel,
        FixAnimationbaseposeSerialization,
        Support8BoneInfluencesSkeletalMeshes,
        AddOverrideGravityFlag,
        SupportGpuskinning8BoneInfluences,
        AnimSupportNonuniformScaleAnimation,
        EngineVersionObject,
        PublicWorlds,
        SkeletonGuidSerialization,
        CharacterMovementWalkableFloorRefactor,
        InverseSquaredLightsDefault,
        DisabledScriptLimitBytecode,
        PrivateRemoteRole,
        FoliageStaticMobility,
        BuildScaleVector,
        FoliageCollision,
        SkyBentNormal,
        LandscapeCollisionDataCooking,
        MorphtargetCpuTangentzdeltaFormatchange,
        SoftConstraintsUseMass,
        ReflectionDataInPackages,
        FoliageMovableMobility,
        UndoBreakMaterialattributesChange,
        AddCustomprofilenameChange,
        FlipMaterialCoords,
        MemberreferenceInPintype,
        VehiclesUnitChange,
        AnimationRemoveNans,
        SkeletonAssetPropertyTypeChange,
        FixBlueprintVariableFlags,
        VehiclesUnitChange2,
        UclassSerializeInterfacesAfterLinking,
        StaticMeshScreenSizeLods,
        FixMaterialCoords,
        SpeedtreeWindV7,
        LoadForEditorGame,
        SerializeRichCurveKey,
        MoveLandscapeMicsAndTexturesWithinLevel,
        FtextHistory,
        FixMaterialComments,
        StoreBoneExportNames,
        MeshEmitterInitialOrientationDistribution,
        DisallowFoliageOnBlueprints,
        FixupMotorUnits,
        DeprecatedMovementcomponentModifiedSpeeds,
        RenameCanbecharacterbase,
        GameplayTagContainerTagTypeChange,
        FoliageSettingsType,
        StaticShadowDepthMaps,
        AddTransactionalToDataAssets,
        AddLbWeightblend,
        AddRootcomponentToFoliageactor,
        FixMaterialPropertyOverrideSerialize,
        AddLinearColorSampler,
        AddStringAssetReferencesMap,
        BlueprintUseScsRootcomponentScale,
        LevelStreamingDrawColorTypeChange,
        ClearNotifyTriggers,
        SkeletonAddSmartnames,
        AddedCurrencyCodeToFtext,
        EnumClassSupport,
        FixupWidgetAnimationClass,
        SoundCompressionTypeAdded,
        AutoWelding,
        RenameCrouchmovescharacterdown,
        LightmapMeshBuildSettings,
        RenameSm3ToEs31,
        DeprecateUmgStyleAssets,
        PostDuplicateNodeGuid,
        RenameCameraComponentViewRotation,
        CasePreservingFname,
        RenameCameraComponentControlRotation,
        FixRefractionInputMasking,
        GlobalEmitterSpawnRateScale,
        CleanDestructibleSettings,
        CharacterMovementUpperImpactBehavior,
        BpMathVectorEqualityUsesEpsilon,
        FoliageStaticLightingSupport,
        SlateCompositeFonts,
        RemoveSavegamesummary,
        RemoveSkeletalmeshComponentBodysetupSerialization,
        SlateBulkFontData,
        AddProjectileFrictionBehavior,
        MovementcomponentAxisSettings,
        GraphInteractiveCommentbubbles,
        LandscapeSerializePhysicsMaterials,
        RenameWidgetVisibility,
        AnimationAddTrackcurves,
        MontageBranchingPointRemoval,
        BlueprintEnforceConstInFunctionOverrides,
        AddPivotToWidgetComponent,
        PawnAutoPossessAi,
        FtextHistoryDateTimezone,
        SortActiveBoneIndices,
        PerframeMaterialUniformExpressions,
        MikktspaceIsDefault,
        LandscapeGrassCooking,
        FixSkelVertOrientMeshParticles,
        LandscapeStaticSectionOffset,
        AddModifiersRuntimeGeneration,
        MaterialMaskedBlendmodeTidy,
        MergedAddModifiersRuntimeGenerationTo47Deprecated,
        AfterMergedAddModifiersRuntimeGenerationTo47Deprecated,
        MergedAddModifiersRuntimeGenerationTo47,
        AfterMergingAddModifiersRuntimeGenerationTo47,
        SerializeLandscapeGrassData,
        OptionallyClearGpuEmittersOnInit,
        SerializeLandscapeGrassDataMaterialGuid,
        BlueprintGeneratedClassComponentTemplatesPublic,
        ActorComponentCreationMethod,
        K2nodeEventMemberReference,
        StructGuidInPropertyTag,
        RemoveUnusedUpolysFromUmodel,
        RebuildHierarchicalInstanceTrees,
        PackageSummaryHasCompatibleEngineVersion,
        TrackUcsModifiedProperties,
        LandscapeSplineCrossLevelMeshes,
        DeprecateUserWidgetDesignSize,
        AddEditorViews,
        FoliageWithAssetOrClass,
        BodyinstanceBinarySerialization,
        SerializeBlueprintEventgraphFastcallsInUfunction,
        InterpcurveSupportsLooping,
        MaterialInstanceBasePropertyOverridesDitheredLodTransition,
        SerializeLandscapeEs2Textures,
        ConstraintInstanceMotorFlags,
        SerializePintypeConst,
        LibraryCategoriesAsFtext,
        SkipDuplicateExportsOnSavePackage,
        SerializeTextInPackages,
        AddBlendModeToWidgetComponent,
        NewLightmassPrimitiveSetting,
        ReplaceSpringNozProperty,
        TightlyPackedEnums,
        AssetImportDataAsJson,
        TextureLegacyGamma,
        AddedNativeSerializationForImmutableStructures,
        DeprecateUmgStyleOverrides,
        StaticShadowmapPenumbraSize,
        NiagaraDataObjectDevUiFix,
        FixedDefaultOrientationOfWidgetComponent,
        RemovedMaterialUsedWithUiFlag,
        CharacterMovementAddBrakingFriction,
        BspUndoFix,
        DynamicParameterDefaultValue,
        StaticMeshExtendedBounds,
        AddedNonLinearTransitionBlends,
        AoMaterialMask,
        NavigationAgentSelector,
        MeshParticleCollisionsConsiderParticleSize,
        BuildMeshAdjBufferFlagExposed,
        MaxAngularVelocityDefault,
        ApexClothTessellation,
        DecalSize,
        KeepOnlyPackageNamesInStringAssetReferencesMap,
        CookedAssetsInEditorSupport,
        DialogueWaveNamespaceAndContextChanges,
        MakeRotRenameAndReorder,
        K2nodeVarReferenceguids,
        SoundConcurrencyPackage,
        UserwidgetDefaultFocusableFalse,
        BlueprintCustomEventConstInput,
        UseLowPassFilterFreq,
        NoAnimBpClassInGameplayCode,
        ScsStoresAllnodesArray,
        FbxImportDataRangeEncapsulation,
        CameraComponentAttachToRoot,
        InstancedStereoUniformUpdate,
        StreamableTextureMinMaxDistance,
        InjectBlueprintStructPinConversionNodes,
        InnerArrayTagInfo,
        FixSlotNameDuplication,
        StreamableTextureAabb,
        PropertyGuidInPropertyTag,
        NameHashesSerialized,
        InstancedStereoUniformRefactor,
        CompressedShaderResources,
        PreloadDependenciesInCookedExports,
        TemplateindexInCookedExports,
        PropertyTagSetMapSupport,
        AddedSearchableNames,
        SixtyFourBitExportmapSerialsizes,
        SkylightMobileIrradianceMap,
        AddedSweepWhileWalkingFlag,
        AddedSoftObjectPath,
        PointlightSourceOrientation,
        AddedPackageSummaryLocalizationId,
        FixWideStringCrc,
        AddedPackageOwner,
        SkinweightProfileDataLayoutChanges,
        NonOuterPackageImport,
        AssetregistryDependencyflags,
        CorrectLicenseeFlag,
    }
}
